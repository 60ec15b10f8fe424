//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod config;
pub(crate) mod offline;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use ronda::AnalysisConfig;
use tracing::info;

/// Load the configuration file, or the defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Write a rendered report to a file, or to stdout.
pub(crate) fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
