//! Ownership and short-interest heuristics.

use ronda_traits::{Ownership, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::config::OwnershipThresholds;

/// Kind of ownership concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipConcernKind {
    /// Insiders hold almost nothing.
    LowInsiderOwnership,
    /// Insiders hold a controlling stake.
    HighInsiderOwnership,
    /// Little institutional interest.
    LowInstitutionalOwnership,
    /// A large share of insider holdings is pledged.
    HighInsiderPledge,
    /// Short interest is elevated.
    HighShortInterest,
}

/// A fired ownership concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipConcern {
    /// Which heuristic fired.
    pub kind: OwnershipConcernKind,
    /// Severity of the concern.
    pub severity: RiskLevel,
    /// Human-readable description.
    pub description: String,
}

/// Ownership analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipAnalysis {
    /// The figures the analysis was based on.
    pub ownership: Ownership,
    /// Concerns raised, possibly empty.
    pub concerns: Vec<OwnershipConcern>,
    /// Highest concern severity, LOW when nothing fired.
    pub risk: RiskLevel,
}

/// Analyze ownership figures.
///
/// Returns `None` when no ownership data was supplied, so that absent data
/// is never read as zero ownership.
#[must_use]
pub fn analyze_ownership(
    ownership: Option<&Ownership>,
    thresholds: &OwnershipThresholds,
) -> Option<OwnershipAnalysis> {
    let ownership = ownership.filter(|o| !o.is_empty())?;
    let mut concerns = Vec::new();

    if let Some(insider) = ownership.insider_pct {
        if insider < thresholds.insider_low_pct {
            concerns.push(OwnershipConcern {
                kind: OwnershipConcernKind::LowInsiderOwnership,
                severity: RiskLevel::Medium,
                description: format!("Insider ownership is only {insider:.1}%"),
            });
        } else if insider > thresholds.insider_high_pct {
            concerns.push(OwnershipConcern {
                kind: OwnershipConcernKind::HighInsiderOwnership,
                severity: RiskLevel::Medium,
                description: format!(
                    "Insiders hold {insider:.1}%, limiting minority shareholder influence"
                ),
            });
        }
    }

    if let Some(institutional) = ownership.institutional_pct
        && institutional < thresholds.institutional_low_pct
    {
        concerns.push(OwnershipConcern {
            kind: OwnershipConcernKind::LowInstitutionalOwnership,
            severity: RiskLevel::Low,
            description: format!("Institutional ownership is only {institutional:.1}%"),
        });
    }

    if let Some(pledged) = ownership.pledged_pct
        && pledged > thresholds.pledged_high_pct
    {
        concerns.push(OwnershipConcern {
            kind: OwnershipConcernKind::HighInsiderPledge,
            severity: RiskLevel::High,
            description: format!("{pledged:.1}% of insider holdings are pledged"),
        });
    }

    if let Some(short_ratio) = ownership.short_ratio
        && short_ratio > thresholds.short_ratio_high
    {
        concerns.push(OwnershipConcern {
            kind: OwnershipConcernKind::HighShortInterest,
            severity: RiskLevel::High,
            description: format!("Short ratio of {short_ratio:.1} days to cover"),
        });
    }

    let risk = concerns
        .iter()
        .map(|c| c.severity)
        .max()
        .unwrap_or(RiskLevel::Low);

    Some(OwnershipAnalysis {
        ownership: *ownership,
        concerns,
        risk,
    })
}
