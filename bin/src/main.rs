//! Ronda CLI binary.
//!
//! Fetches statements, prices and news for a symbol, or reads them from
//! local files, and renders a forensic risk report.

mod cmd;
mod data;
mod report;

use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::{analyze::AnalyzeArgs, config::ConfigArgs, offline::OfflineArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Forensic risk analysis for listed equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch data from Financial Modeling Prep and analyze a symbol
    Analyze(AnalyzeArgs),

    /// Analyze a symbol from a JSON input file and optional price CSV
    Offline(OfflineArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze(args) => cmd::analyze::run(args).await?,
        Commands::Offline(args) => cmd::offline::run(args)?,
        Commands::Config(args) => cmd::config::run(args)?,
    }

    Ok(())
}
