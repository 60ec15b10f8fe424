#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model, primitives and traits for the Ronda forensic risk toolkit.
//!
//! This crate provides the value types every analysis stage consumes
//! (financial periods, price series, news items), the safe ratio and
//! statistics primitives, and the [`Scorer`] abstraction.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod risk;
pub mod scorer;
pub mod statements;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use risk::RiskLevel;
pub use scorer::Scorer;
pub use statements::{FinancialPeriod, MarketSnapshot, Ownership};
pub use types::{Date, MarketData, NewsItem, PriceBar, PriceSeries, Symbol};
