//! Config command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cmd::load_config;

/// Arguments for `ronda config`.
#[derive(Debug, Args)]
pub(crate) struct ConfigArgs {
    /// Configuration file to validate and print merged with the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Print the effective configuration as JSON.
pub(crate) fn run(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}
