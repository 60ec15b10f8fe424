//! Offline command implementation.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ronda::AnalysisInput;
use tracing::info;

use crate::{
    cmd::{load_config, write_output},
    data,
    report::{OutputFormat, render},
};

/// Arguments for `ronda offline`.
#[derive(Debug, Args)]
pub(crate) struct OfflineArgs {
    /// JSON input with symbol, periods, snapshot, prices and news
    input: PathBuf,

    /// Daily OHLCV CSV overriding the input's prices
    #[arg(long)]
    prices: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Analyze a symbol from local files.
pub(crate) fn run(args: OfflineArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut input = AnalysisInput::from_json(&json)
        .with_context(|| format!("Invalid input {}", args.input.display()))?;

    if let Some(path) = &args.prices {
        let prices = data::load_prices_csv(path)
            .with_context(|| format!("Failed to load prices {}", path.display()))?;
        info!(path = %path.display(), bars = prices.len(), "Loaded price CSV");
        input.prices = Some(prices);
    }

    let analysis = input.analyze(&config);
    write_output(&render(&analysis, args.format)?, args.output.as_deref())
}
