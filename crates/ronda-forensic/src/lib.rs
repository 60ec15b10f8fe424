//! Forensic accounting scores for Ronda.
//!
//! This crate turns a company's financial statement history into:
//! - the Beneish M-Score and its eight component indices
//! - the Altman Z-Score, its five ratios and zone
//! - independent red-flag checks on margins, leverage, liquidity and growth
//! - ownership and short-interest heuristics
//!
//! Missing line items never default to zero. Each index that cannot be
//! computed is reported as unavailable, and a composite score is only
//! produced when all of its components are.
//!
//! # Example
//!
//! ```
//! use ronda_forensic::{ForensicInput, ForensicScorer};
//! use ronda_traits::{FinancialPeriod, MarketSnapshot, Scorer};
//!
//! let current = FinancialPeriod {
//!     revenue: Some(1200.0),
//!     total_assets: Some(2000.0),
//!     ..Default::default()
//! };
//! let prior = FinancialPeriod {
//!     revenue: Some(1000.0),
//!     total_assets: Some(1900.0),
//!     ..Default::default()
//! };
//! let periods = [current, prior];
//! let snapshot = MarketSnapshot::default();
//!
//! let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));
//! assert_eq!(report.beneish.indices.sgi, Some(1.2));
//! assert!(report.beneish.m_score.is_none());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod altman;
pub mod beneish;
pub mod config;
pub mod ownership;
pub mod red_flags;
pub mod scorer;

pub use altman::{AltmanRatios, AltmanResult, AltmanZone};
pub use beneish::{BeneishIndex, BeneishIndices, BeneishResult, IndexReading};
pub use config::{ForensicConfig, OwnershipThresholds};
pub use ownership::{OwnershipAnalysis, OwnershipConcern, OwnershipConcernKind};
pub use red_flags::{RedFlag, RedFlagKind, RedFlagScan};
pub use scorer::{ForensicInput, ForensicReport, ForensicScorer};
