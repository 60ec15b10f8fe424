//! Altman Z-Score bankruptcy model.
//!
//! Z = 1.2·X1 + 1.4·X2 + 3.3·X3 + 0.6·X4 + 1.0·X5, computed from the latest
//! period and the current market capitalization.
//!
//! # References
//!
//! Altman, E. I. (1968). Financial Ratios, Discriminant Analysis and the
//! Prediction of Corporate Bankruptcy. Journal of Finance, 23(4), 589-609.

use std::fmt;

use ronda_traits::{FinancialPeriod, MarketSnapshot, RiskLevel, stats::ratio};
use serde::{Deserialize, Serialize};

/// Coefficients for X1..X5.
pub const COEFFICIENTS: [f64; 5] = [1.2, 1.4, 3.3, 0.6, 1.0];

/// The five Altman ratios. `None` marks a ratio whose inputs were missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AltmanRatios {
    /// Working capital / total assets.
    pub x1: Option<f64>,
    /// Retained earnings / total assets.
    pub x2: Option<f64>,
    /// EBIT / total assets.
    pub x3: Option<f64>,
    /// Market capitalization / total liabilities.
    pub x4: Option<f64>,
    /// Sales / total assets.
    pub x5: Option<f64>,
}

impl AltmanRatios {
    /// Compute the ratios from the latest period.
    ///
    /// X4 uses the snapshot's total liabilities when present and falls back
    /// to the period's balance sheet.
    #[must_use]
    pub fn compute(period: &FinancialPeriod, snapshot: &MarketSnapshot) -> Self {
        let assets = period.total_assets;
        let liabilities = snapshot.total_liabilities.or(period.total_liabilities);

        Self {
            x1: ratio(period.working_capital(), assets),
            x2: ratio(period.retained_earnings, assets),
            x3: ratio(period.ebit, assets),
            x4: ratio(snapshot.market_cap, liabilities),
            x5: ratio(period.revenue, assets),
        }
    }

    /// Ratios in X1..X5 order.
    #[must_use]
    pub const fn as_array(&self) -> [Option<f64>; 5] {
        [self.x1, self.x2, self.x3, self.x4, self.x5]
    }

    /// The Z-Score, or `None` unless all five ratios are available.
    #[must_use]
    pub fn z_score(&self) -> Option<f64> {
        self.as_array()
            .iter()
            .zip(COEFFICIENTS)
            .try_fold(0.0, |acc, (x, c)| Some(acc + c * (*x)?))
    }
}

/// Z-Score zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltmanZone {
    /// Low bankruptcy risk.
    Safe,
    /// Ambiguous region between the two cut-offs, both inclusive.
    Grey,
    /// High bankruptcy risk.
    Distress,
}

impl AltmanZone {
    /// Classify a score. Scores equal to either cut-off fall in the grey zone.
    #[must_use]
    pub fn classify(z: f64, safe_above: f64, distress_below: f64) -> Self {
        if z > safe_above {
            Self::Safe
        } else if z < distress_below {
            Self::Distress
        } else {
            Self::Grey
        }
    }

    /// Risk bucket for the zone.
    #[must_use]
    pub const fn risk(&self) -> RiskLevel {
        match self {
            Self::Safe => RiskLevel::Low,
            Self::Grey => RiskLevel::Medium,
            Self::Distress => RiskLevel::High,
        }
    }
}

impl fmt::Display for AltmanZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Safe => "Safe",
            Self::Grey => "Grey",
            Self::Distress => "Distress",
        };
        f.write_str(label)
    }
}

/// Altman analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltmanResult {
    /// Component ratios.
    pub ratios: AltmanRatios,
    /// Composite score, `None` on insufficient data.
    pub z_score: Option<f64>,
    /// Zone, `None` without a score.
    pub zone: Option<AltmanZone>,
    /// Risk bucket, `None` without a score.
    pub risk: Option<RiskLevel>,
    /// Plain-language summary.
    pub interpretation: String,
}

impl AltmanResult {
    /// Build the result from computed ratios.
    #[must_use]
    pub fn from_ratios(ratios: AltmanRatios, safe_above: f64, distress_below: f64) -> Self {
        let z_score = ratios.z_score();
        let zone = z_score.map(|z| AltmanZone::classify(z, safe_above, distress_below));

        let interpretation = match (z_score, zone) {
            (Some(z), Some(AltmanZone::Safe)) => format!("Z-Score {z:.2}: safe zone, low bankruptcy risk"),
            (Some(z), Some(AltmanZone::Grey)) => format!("Z-Score {z:.2}: grey zone, moderate risk"),
            (Some(z), Some(AltmanZone::Distress)) => {
                format!("Z-Score {z:.2}: distress zone, high bankruptcy risk")
            }
            _ => "Insufficient data".to_string(),
        };

        Self {
            ratios,
            z_score,
            zone,
            risk: zone.as_ref().map(AltmanZone::risk),
            interpretation,
        }
    }

    /// Result when no period is available.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            ratios: AltmanRatios::default(),
            z_score: None,
            zone: None,
            risk: None,
            interpretation: "Insufficient data".to_string(),
        }
    }
}
