//! Thresholds for the forensic scorer.

use serde::{Deserialize, Serialize};

use crate::beneish::MANIPULATION_THRESHOLD;

/// Configuration for the forensic scorer.
///
/// Formula coefficients are fixed constants in [`crate::beneish`] and
/// [`crate::altman`]; only decision thresholds are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForensicConfig {
    /// M-Score above which manipulation is flagged (default: -2.22)
    pub m_score_threshold: f64,

    /// Z-Score above which a company is in the safe zone (default: 2.99)
    pub z_safe_above: f64,

    /// Z-Score below which a company is in the distress zone (default: 1.81)
    pub z_distress_below: f64,

    /// Debt-to-equity ratio above which leverage is a HIGH flag (default: 2.0)
    pub max_debt_to_equity: f64,

    /// Debt-to-equity ratio above which leverage is a MEDIUM flag (default: 1.0)
    pub elevated_debt_to_equity: f64,

    /// Current ratio below which liquidity is a HIGH flag (default: 1.0)
    pub min_current_ratio: f64,

    /// Current ratio below which liquidity is a MEDIUM flag (default: 1.5)
    pub comfortable_current_ratio: f64,

    /// Net margin below which profitability is a MEDIUM flag; a negative
    /// margin is always HIGH (default: 0.05)
    pub low_profit_margin: f64,

    /// Year-over-year revenue decline treated as severe (default: 0.10)
    pub severe_revenue_decline: f64,

    /// Weighted red-flag or overall forensic score above which risk is
    /// MEDIUM (default: 0.3)
    pub risk_medium_above: f64,

    /// Weighted red-flag or overall forensic score above which risk is
    /// HIGH (default: 0.6)
    pub risk_high_above: f64,

    /// Ownership concern thresholds
    pub ownership: OwnershipThresholds,
}

impl Default for ForensicConfig {
    fn default() -> Self {
        Self {
            m_score_threshold: MANIPULATION_THRESHOLD,
            z_safe_above: 2.99,
            z_distress_below: 1.81,
            max_debt_to_equity: 2.0,
            elevated_debt_to_equity: 1.0,
            min_current_ratio: 1.0,
            comfortable_current_ratio: 1.5,
            low_profit_margin: 0.05,
            severe_revenue_decline: 0.10,
            risk_medium_above: 0.3,
            risk_high_above: 0.6,
            ownership: OwnershipThresholds::default(),
        }
    }
}

/// Percentage thresholds for the ownership heuristics (0-100 scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipThresholds {
    /// Insider ownership below this is a concern (default: 1.0)
    pub insider_low_pct: f64,

    /// Insider ownership above this is a governance concern (default: 75.0)
    pub insider_high_pct: f64,

    /// Institutional ownership below this is a concern (default: 10.0)
    pub institutional_low_pct: f64,

    /// Pledged share of insider holdings above this is a concern (default: 25.0)
    pub pledged_high_pct: f64,

    /// Short ratio (days to cover) above this is a concern (default: 10.0)
    pub short_ratio_high: f64,
}

impl Default for OwnershipThresholds {
    fn default() -> Self {
        Self {
            insider_low_pct: 1.0,
            insider_high_pct: 75.0,
            institutional_low_pct: 10.0,
            pledged_high_pct: 25.0,
            short_ratio_high: 10.0,
        }
    }
}
