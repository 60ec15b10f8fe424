//! Financial Modeling Prep (FMP) API client for Ronda.
//!
//! This crate fetches statements, quotes, price history and news from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! converts them into the data model the Ronda scorers consume.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Merged statements, most recent first
//!     let periods = client.financial_periods("AAPL", 5).await?;
//!
//!     // Market cap, liabilities and float-derived ownership
//!     let snapshot = client.market_snapshot("AAPL").await?;
//!
//!     // Recent headlines
//!     let news = client.stock_news("AAPL", 20).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod convert;
mod error;
mod types;

pub use client::FmpClient;
pub use convert::merge_statements;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
