//! Qualitative risk buckets shared by every report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl RiskLevel {
    /// Upper-case label used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Bucket `value` against two cut-offs.
    ///
    /// Values below `medium_from` are LOW, values above `high_above` are HIGH,
    /// and the closed interval between them is MEDIUM.
    #[must_use]
    pub fn from_thresholds(value: f64, medium_from: f64, high_above: f64) -> Self {
        if value > high_above {
            Self::High
        } else if value >= medium_from {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Bucket `value` against two strict cut-offs.
    ///
    /// Values above `high_above` are HIGH, values above `medium_above` are
    /// MEDIUM and everything else, the cut-offs included, falls one bucket
    /// lower.
    #[must_use]
    pub fn above_thresholds(value: f64, medium_above: f64, high_above: f64) -> Self {
        if value > high_above {
            Self::High
        } else if value > medium_above {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
