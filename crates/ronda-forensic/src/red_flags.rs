//! Independent financial-health warning checks.

use std::fmt;

use ronda_traits::{FinancialPeriod, RiskLevel, stats::ratio};
use serde::{Deserialize, Serialize};

use crate::config::ForensicConfig;

/// Kind of red flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagKind {
    /// Net margin fell versus the prior period.
    DecliningMargin,
    /// Net margin negative or below the configured floor.
    WeakProfitMargin,
    /// Debt-to-equity above the elevated or maximum level.
    HighLeverage,
    /// Current ratio below the comfortable or minimum level.
    WeakLiquidity,
    /// Return on equity below zero.
    NegativeReturnOnEquity,
    /// Revenue fell versus the prior period.
    RevenueDecline,
}

impl fmt::Display for RedFlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DecliningMargin => "Declining margin",
            Self::WeakProfitMargin => "Weak profit margin",
            Self::HighLeverage => "High leverage",
            Self::WeakLiquidity => "Weak liquidity",
            Self::NegativeReturnOnEquity => "Negative ROE",
            Self::RevenueDecline => "Revenue decline",
        };
        f.write_str(label)
    }
}

/// A fired red flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Which check fired.
    pub kind: RedFlagKind,
    /// Severity of the finding.
    pub severity: RiskLevel,
    /// Human-readable description.
    pub description: String,
    /// The value that triggered the check.
    pub value: f64,
}

impl RedFlag {
    /// Contribution of this flag to the weighted red-flag score.
    ///
    /// HIGH flags add 0.2, except negative ROE and revenue decline which
    /// add 0.15. MEDIUM flags add 0.1.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        match (self.severity, self.kind) {
            (RiskLevel::High, RedFlagKind::NegativeReturnOnEquity | RedFlagKind::RevenueDecline) => {
                0.15
            }
            (RiskLevel::High, _) => 0.2,
            (RiskLevel::Medium, _) => 0.1,
            (RiskLevel::Low, _) => 0.0,
        }
    }
}

/// Outcome of the red-flag checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedFlagScan {
    /// Fired flags, in check order.
    pub flags: Vec<RedFlag>,
    /// Number of checks whose inputs were all present.
    pub checks_evaluated: usize,
}

impl RedFlagScan {
    /// Sum of flag weights capped at 1.0, `None` when no check could run.
    #[must_use]
    pub fn risk_score(&self) -> Option<f64> {
        (self.checks_evaluated > 0)
            .then(|| self.flags.iter().map(RedFlag::weight).sum::<f64>().min(1.0))
    }
}

fn tiered(value: f64, high: bool, medium: bool) -> Option<(RiskLevel, f64)> {
    if high {
        Some((RiskLevel::High, value))
    } else if medium {
        Some((RiskLevel::Medium, value))
    } else {
        None
    }
}

/// Run every red-flag check against the most-recent-first `periods`.
///
/// Checks needing a prior period are skipped with fewer than two periods.
/// A check whose inputs are missing does not fire and is not counted as
/// evaluated.
#[must_use]
pub fn detect_red_flags(periods: &[FinancialPeriod], config: &ForensicConfig) -> RedFlagScan {
    let mut scan = RedFlagScan::default();
    let Some(current) = periods.first() else {
        return scan;
    };
    let prior = periods.get(1);

    let margin = |p: &FinancialPeriod| {
        p.revenue
            .filter(|r| *r > 0.0)
            .and_then(|revenue| ratio(p.net_income, Some(revenue)))
    };

    if let Some(prior) = prior
        && let (Some(curr), Some(prev)) = (margin(current), margin(prior))
    {
        scan.checks_evaluated += 1;
        if curr < prev {
            scan.flags.push(RedFlag {
                kind: RedFlagKind::DecliningMargin,
                severity: RiskLevel::Medium,
                description: format!(
                    "Net margin declined from {:.1}% to {:.1}%",
                    prev * 100.0,
                    curr * 100.0
                ),
                value: curr,
            });
        }
    }

    if let Some(net_margin) = margin(current) {
        scan.checks_evaluated += 1;
        if let Some((severity, value)) =
            tiered(net_margin, net_margin < 0.0, net_margin < config.low_profit_margin)
        {
            let description = if severity == RiskLevel::High {
                format!("Net margin is negative ({:.1}%)", value * 100.0)
            } else {
                format!(
                    "Net margin of {:.1}% is below {:.1}%",
                    value * 100.0,
                    config.low_profit_margin * 100.0
                )
            };
            scan.flags.push(RedFlag {
                kind: RedFlagKind::WeakProfitMargin,
                severity,
                description,
                value,
            });
        }
    }

    let equity = current.total_equity.filter(|e| *e > 0.0);
    if let Some(leverage) = equity.and_then(|e| ratio(current.total_debt, Some(e))) {
        scan.checks_evaluated += 1;
        if let Some((severity, value)) = tiered(
            leverage,
            leverage > config.max_debt_to_equity,
            leverage > config.elevated_debt_to_equity,
        ) {
            let limit = if severity == RiskLevel::High {
                config.max_debt_to_equity
            } else {
                config.elevated_debt_to_equity
            };
            scan.flags.push(RedFlag {
                kind: RedFlagKind::HighLeverage,
                severity,
                description: format!("Debt-to-equity of {value:.2} exceeds {limit:.2}"),
                value,
            });
        }
    }

    let liabilities = current.total_current_liabilities.filter(|l| *l > 0.0);
    if let Some(current_ratio) =
        liabilities.and_then(|l| ratio(current.total_current_assets, Some(l)))
    {
        scan.checks_evaluated += 1;
        if let Some((severity, value)) = tiered(
            current_ratio,
            current_ratio < config.min_current_ratio,
            current_ratio < config.comfortable_current_ratio,
        ) {
            let limit = if severity == RiskLevel::High {
                config.min_current_ratio
            } else {
                config.comfortable_current_ratio
            };
            scan.flags.push(RedFlag {
                kind: RedFlagKind::WeakLiquidity,
                severity,
                description: format!("Current ratio of {value:.2} is below {limit:.2}"),
                value,
            });
        }
    }

    if let Some(roe) = ratio(current.net_income, current.total_equity) {
        scan.checks_evaluated += 1;
        if roe < 0.0 {
            scan.flags.push(RedFlag {
                kind: RedFlagKind::NegativeReturnOnEquity,
                severity: RiskLevel::High,
                description: format!("Return on equity is negative ({:.1}%)", roe * 100.0),
                value: roe,
            });
        }
    }

    if let Some(prior) = prior
        && let (Some(curr), Some(prev)) = (current.revenue, prior.revenue)
        && prev > 0.0
    {
        scan.checks_evaluated += 1;
        if curr < prev {
            let decline = (prev - curr) / prev;
            let severity = if decline > config.severe_revenue_decline {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            scan.flags.push(RedFlag {
                kind: RedFlagKind::RevenueDecline,
                severity,
                description: format!("Revenue declined {:.1}% year over year", decline * 100.0),
                value: decline,
            });
        }
    }

    scan
}
