//! Keyword-based news risk scoring for Ronda.
//!
//! Each news item is classified by the keyword lists in [`NewsConfig`]:
//! a risk tier (high, medium, low) and a sentiment label. The scorer then
//! aggregates the items into a [`NewsReport`] with a plurality sentiment,
//! the highest risk tier, the critical items and the most frequent topics.
//!
//! An empty news set is a normal input and scores NEUTRAL with LOW risk.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod keywords;
pub mod scorer;
pub mod topics;

pub use config::NewsConfig;
pub use keywords::{ItemAssessment, NormalizedText, Sentiment};
pub use scorer::{CriticalItem, NewsReport, NewsScorer};
pub use topics::Topic;
