//! Risk aggregation for Ronda.
//!
//! This crate normalizes the forensic, news and pattern reports into
//! component values in [0, 1] and combines them with fixed weights
//! (0.5 / 0.3 / 0.2 by default) into one overall risk score and level.
//!
//! A component that could not be computed is left out and the remaining
//! weights are rescaled, so missing prices or statements do not read as zero
//! risk.
//!
//! # Examples
//!
//! ```
//! use ronda_combine::RiskAggregator;
//! use ronda_traits::RiskLevel;
//!
//! let overall = RiskAggregator::default().combine(Some(1.0), Some(0.9), Some(0.0));
//! assert!((overall.score - 0.77).abs() < 1e-12);
//! assert_eq!(overall.level, RiskLevel::High);
//! ```

mod aggregator;
mod combiner;

// Re-export main types
pub use aggregator::{
    AggregatorConfig, ComponentWeights, LEVEL_TOLERANCE, NewsRiskValues, OverallRisk, RiskAggregator,
    ZoneRiskValues,
};
pub use combiner::{Component, ComponentScore, combine_weighted};
