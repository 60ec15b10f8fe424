#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Core data model, statistics primitives and the [`Scorer`] trait
//! - [`forensic`] - Beneish, Altman, red flags and ownership heuristics
//! - [`patterns`] - Price and volume pattern detection
//! - [`news`] - Keyword-based news risk scoring
//! - [`combine`] - Weighted aggregation into an overall risk level
//! - [`fmp`] - Financial Modeling Prep client
//!
//! ## Architecture
//!
//! Every stage is a pure, synchronous [`Scorer`]. Missing inputs surface as
//! unavailable sub-results instead of errors, and [`analyze`] wires the
//! stages together:
//!
//! 1. **Forensic** scores the statement history and market snapshot
//! 2. **Patterns** scan the price history, when there is one
//! 3. **News** classifies headlines and descriptions
//! 4. **Aggregator** weights the three components 0.5 / 0.3 / 0.2

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod analysis;
mod config;

pub use analysis::{Analysis, AnalysisInput, analyze};
pub use config::AnalysisConfig;

// ============================================================================
// Core Types
// ============================================================================

/// Core data model and primitives.
///
/// Financial periods, price series, news items, the [`RiskLevel`] bucket,
/// safe ratio helpers in [`traits::stats`] and the [`Scorer`] trait.
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_traits::{Result, RiskLevel, RondaError, Scorer};

// ============================================================================
// Analysis Stages
// ============================================================================

/// Forensic accounting scores.
///
/// ## Models
///
/// ### Beneish M-Score
///
/// ```text
/// M = -4.84 + 0.920·DSRI + 0.528·GMI + 0.404·AQI + 0.892·SGI
///     + 0.115·DEPI - 0.172·SGAI + 4.679·TATA - 0.327·LVGI
/// ```
///
/// A score above -2.22 flags likely earnings manipulation.
///
/// ### Altman Z-Score
///
/// ```text
/// Z = 1.2·X1 + 1.4·X2 + 3.3·X3 + 0.6·X4 + 1.0·X5
/// ```
///
/// Above 2.99 is the safe zone, below 1.81 the distress zone.
pub mod forensic {
    pub use ronda_forensic::*;
}

/// Price and volume pattern detection.
pub mod patterns {
    pub use ronda_patterns::*;
}

/// News sentiment and risk keywords.
pub mod news {
    pub use ronda_news::*;
}

/// Overall risk aggregation.
pub mod combine {
    pub use ronda_combine::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
///
/// ## Example
///
/// ```ignore
/// use ronda::fmp::FmpClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FmpClient::from_env()?;
///     let periods = client.financial_periods("AAPL", 5).await?;
///     println!("{} periods", periods.len());
///     Ok(())
/// }
/// ```
pub mod fmp {
    pub use ronda_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::{
        FinancialPeriod, MarketSnapshot, NewsItem, Ownership, PriceBar, PriceSeries,
    };
    pub use crate::{Analysis, AnalysisConfig, AnalysisInput, analyze};
    pub use crate::{Result, RiskLevel, RondaError, Scorer};
}
