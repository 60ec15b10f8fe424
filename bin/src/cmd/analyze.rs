//! Analyze command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use ronda::analyze;
use ronda::fmp::FmpClient;

use crate::{
    cmd::{load_config, write_output},
    data,
    report::{OutputFormat, render},
};

/// Arguments for `ronda analyze`.
#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Ticker symbol
    symbol: String,

    /// Price history period (1m, 3m, 6m, 1y, 2y, 5y)
    #[arg(short, long, default_value = "1y")]
    period: String,

    /// Last day of price history (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    end: Option<String>,

    /// Number of annual statements to fetch
    #[arg(long, default_value = "5")]
    statements: u32,

    /// Maximum number of news articles
    #[arg(long, default_value = "20")]
    news_limit: u32,

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

/// Fetch data for a symbol from FMP and analyze it.
pub(crate) async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let lookback = data::parse_period(&args.period)?;
    let client = FmpClient::from_env().context("Set FMP_API_KEY to fetch live data")?;

    let symbol = args.symbol.to_uppercase();
    let to = match &args.end {
        Some(end) => data::parse_date(end)?,
        None => Utc::now().date_naive(),
    };
    let from = to - lookback;

    let fetched = data::fetch_symbol(
        &client,
        &symbol,
        args.statements,
        from,
        to,
        args.news_limit,
    )
    .await;

    let analysis = analyze(
        &symbol,
        &fetched.periods,
        fetched.prices.as_ref(),
        &fetched.news,
        &fetched.snapshot,
        &config,
    );

    write_output(&render(&analysis, args.format)?, args.output.as_deref())
}
