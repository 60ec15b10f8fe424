//! Price and volume pattern detection for Ronda.
//!
//! Every check is a pure function of a [`PriceSeries`](ronda_traits::PriceSeries):
//! - volume spikes against a trailing mean
//! - return anomalies against a rolling mean and sample standard deviation
//! - opening gaps
//! - price-volume divergence over a trailing window
//! - realized volatility with a risk bucket
//!
//! Each check is bucketed into a [`RiskLevel`](ronda_traits::RiskLevel) and
//! the buckets are averaged into a [`PatternRisk`] score.
//!
//! Rolling checks return `None` when the series is too short, rather than
//! statistics computed from a handful of points.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod anomaly;
pub mod config;
pub mod detector;
pub mod divergence;
pub mod gap;
pub mod risk;
pub mod volatility;
pub mod volume;

#[cfg(test)]
mod fixtures;

pub use anomaly::{MoveDirection, PriceAnomaly};
pub use config::PatternConfig;
pub use detector::{PatternDetector, PatternReport};
pub use divergence::{DivergenceKind, DivergenceReading};
pub use gap::{GapDirection, GapEvent};
pub use risk::PatternRisk;
pub use volatility::VolatilityReading;
pub use volume::VolumeSpike;
