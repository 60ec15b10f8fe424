//! The forensic scorer stage.

use ronda_traits::{FinancialPeriod, MarketSnapshot, RiskLevel, Scorer, stats::mean};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    altman::{AltmanRatios, AltmanResult},
    beneish::{BeneishIndices, BeneishResult},
    config::ForensicConfig,
    ownership::{OwnershipAnalysis, analyze_ownership},
    red_flags::{RedFlag, detect_red_flags},
};

/// Borrowed input for [`ForensicScorer`].
#[derive(Debug, Clone, Copy)]
pub struct ForensicInput<'a> {
    /// Financial periods, most recent first.
    pub periods: &'a [FinancialPeriod],
    /// Market capitalization, liabilities and ownership.
    pub snapshot: &'a MarketSnapshot,
}

impl<'a> ForensicInput<'a> {
    /// Bundle periods and a market snapshot.
    #[must_use]
    pub const fn new(periods: &'a [FinancialPeriod], snapshot: &'a MarketSnapshot) -> Self {
        Self { periods, snapshot }
    }
}

/// Forensic analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    /// Beneish M-Score analysis.
    pub beneish: BeneishResult,
    /// Altman Z-Score analysis.
    pub altman: AltmanResult,
    /// Fired red flags.
    pub red_flags: Vec<RedFlag>,
    /// Number of red-flag checks that had their inputs.
    pub red_flag_checks: usize,
    /// Weighted red-flag score in [0, 1], `None` when no check could run.
    pub red_flag_score: Option<f64>,
    /// Bucket of the red-flag score.
    pub red_flag_risk: Option<RiskLevel>,
    /// Ownership heuristics, `None` without ownership data.
    pub ownership: Option<OwnershipAnalysis>,
    /// Mean of the M-Score, Z-zone and red-flag scores that are available.
    pub risk_score: Option<f64>,
    /// Bucket of the overall forensic score.
    pub risk_level: Option<RiskLevel>,
    /// Number of periods supplied.
    pub periods_analyzed: usize,
}

impl ForensicReport {
    /// Whether the M-Score crossed the manipulation threshold.
    ///
    /// An unavailable M-Score reads as not flagged.
    #[must_use]
    pub fn manipulation_flag(&self) -> bool {
        self.beneish.manipulation_flag.unwrap_or(false)
    }

    /// Number of fired red flags.
    #[must_use]
    pub const fn red_flag_count(&self) -> usize {
        self.red_flags.len()
    }

    /// Highest risk across the available sub-results.
    #[must_use]
    pub fn highest_risk(&self) -> RiskLevel {
        self.beneish
            .risk
            .into_iter()
            .chain(self.altman.risk)
            .chain(self.red_flags.iter().map(|f| f.severity))
            .chain(self.ownership.as_ref().map(|o| o.risk))
            .max()
            .unwrap_or(RiskLevel::Low)
    }

    /// Whether no forensic model or red-flag check had enough data to run.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        self.beneish.m_score.is_none() && self.altman.z_score.is_none() && self.red_flag_checks == 0
    }
}

/// Score of each sub-result for the overall forensic mean.
///
/// A flagged M-Score counts 1.0 and a clean one 0.3. Altman zones count
/// 1.0 in distress, 0.5 in the grey zone and 0.2 when safe.
fn forensic_risk_score(
    beneish: &BeneishResult,
    altman: &AltmanResult,
    red_flag_score: Option<f64>,
) -> Option<f64> {
    let m_part = beneish
        .manipulation_flag
        .map(|flagged| if flagged { 1.0 } else { 0.3 });
    let z_part = altman.risk.map(|risk| match risk {
        RiskLevel::High => 1.0,
        RiskLevel::Medium => 0.5,
        RiskLevel::Low => 0.2,
    });
    let parts: Vec<f64> = m_part.into_iter().chain(z_part).chain(red_flag_score).collect();
    mean(&parts)
}

/// Computes the Beneish and Altman models, red flags and ownership
/// heuristics from a company's statement history.
///
/// # Example
///
/// ```
/// use ronda_forensic::{ForensicInput, ForensicScorer};
/// use ronda_traits::{FinancialPeriod, MarketSnapshot, Scorer};
///
/// let scorer = ForensicScorer::default();
/// let periods = vec![FinancialPeriod::default(), FinancialPeriod::default()];
/// let snapshot = MarketSnapshot::default();
///
/// let report = scorer.score(&ForensicInput::new(&periods, &snapshot));
/// assert!(report.beneish.m_score.is_none());
/// assert!(!report.manipulation_flag());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForensicScorer {
    config: ForensicConfig,
}

impl ForensicScorer {
    /// Create a scorer with the given configuration.
    #[must_use]
    pub const fn new(config: ForensicConfig) -> Self {
        Self { config }
    }

    /// The scorer's configuration.
    #[must_use]
    pub const fn config(&self) -> &ForensicConfig {
        &self.config
    }

    fn beneish(&self, periods: &[FinancialPeriod]) -> BeneishResult {
        let threshold = self.config.m_score_threshold;
        match periods {
            [current, prior, ..] => {
                let indices = BeneishIndices::compute(current, prior);
                let result = BeneishResult::from_indices(indices, threshold);
                if result.m_score.is_none() {
                    debug!(missing = ?indices.missing(), "M-Score unavailable");
                }
                result
            }
            _ => {
                debug!(periods = periods.len(), "Beneish model needs two periods");
                BeneishResult::unavailable(threshold)
            }
        }
    }

    fn altman(&self, periods: &[FinancialPeriod], snapshot: &MarketSnapshot) -> AltmanResult {
        let Some(current) = periods.first() else {
            debug!("Altman model needs at least one period");
            return AltmanResult::unavailable();
        };
        let ratios = AltmanRatios::compute(current, snapshot);
        let result =
            AltmanResult::from_ratios(ratios, self.config.z_safe_above, self.config.z_distress_below);
        if result.z_score.is_none() {
            debug!(?ratios, "Z-Score unavailable");
        }
        result
    }
}

impl Scorer for ForensicScorer {
    type Input<'a> = ForensicInput<'a>;
    type Report = ForensicReport;

    fn name(&self) -> &str {
        "forensic"
    }

    fn score(&self, input: &ForensicInput<'_>) -> ForensicReport {
        let periods = input.periods;

        let beneish = self.beneish(periods);
        let altman = self.altman(periods, input.snapshot);
        let scan = detect_red_flags(periods, &self.config);
        let red_flag_score = scan.risk_score();
        let bucket = |score: f64| {
            RiskLevel::above_thresholds(
                score,
                self.config.risk_medium_above,
                self.config.risk_high_above,
            )
        };
        let risk_score = forensic_risk_score(&beneish, &altman, red_flag_score);
        let ownership = analyze_ownership(input.snapshot.ownership.as_ref(), &self.config.ownership);
        if ownership.is_none() {
            debug!("No ownership data");
        }

        info!(
            periods = periods.len(),
            m_score = ?beneish.m_score,
            z_score = ?altman.z_score,
            red_flags = scan.flags.len(),
            risk_score = ?risk_score,
            "Forensic analysis complete"
        );

        ForensicReport {
            beneish,
            altman,
            red_flags: scan.flags,
            red_flag_checks: scan.checks_evaluated,
            red_flag_score,
            red_flag_risk: red_flag_score.map(bucket),
            ownership,
            risk_score,
            risk_level: risk_score.map(bucket),
            periods_analyzed: periods.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altman::AltmanZone;
    use approx::assert_relative_eq;
    use ronda_traits::Ownership;

    fn period(revenue: f64, receivables: f64, net_income: f64) -> FinancialPeriod {
        FinancialPeriod {
            revenue: Some(revenue),
            cost_of_revenue: Some(revenue * 0.55),
            net_receivables: Some(receivables),
            total_current_assets: Some(900.0),
            total_current_liabilities: Some(500.0),
            net_ppe: Some(700.0),
            total_assets: Some(2000.0),
            total_liabilities: Some(900.0),
            depreciation: Some(70.0),
            sga_expense: Some(revenue * 0.18),
            total_debt: Some(400.0),
            retained_earnings: Some(600.0),
            ebit: Some(revenue * 0.15),
            net_income: Some(net_income),
            operating_cash_flow: Some(net_income * 1.2),
            total_equity: Some(1100.0),
            ..Default::default()
        }
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            market_cap: Some(4000.0),
            total_liabilities: None,
            ownership: Some(Ownership {
                insider_pct: Some(5.0),
                institutional_pct: Some(70.0),
                pledged_pct: None,
                short_ratio: Some(1.5),
            }),
        }
    }

    #[test]
    fn test_full_report() {
        let periods = vec![period(1800.0, 200.0, 180.0), period(1600.0, 180.0, 150.0)];
        let snapshot = snapshot();
        let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));

        assert_eq!(report.periods_analyzed, 2);
        assert!(report.beneish.m_score.is_some());
        assert_eq!(report.beneish.readings.len(), 8);
        assert!(!report.manipulation_flag());
        assert_eq!(report.altman.zone, Some(AltmanZone::Safe));
        assert_eq!(report.red_flag_count(), 0);
        assert_eq!(report.ownership.as_ref().unwrap().risk, RiskLevel::Low);
        assert_eq!(report.highest_risk(), RiskLevel::Low);

        // Clean M-Score 0.3, safe zone 0.2, no weighted flags
        assert_eq!(report.red_flag_score, Some(0.0));
        assert_relative_eq!(report.risk_score.unwrap(), 0.5 / 3.0, epsilon = 1e-12);
        assert_eq!(report.risk_level, Some(RiskLevel::Low));
        assert!(!report.is_unavailable());
    }

    #[test]
    fn test_distress_and_flags_raise_forensic_risk() {
        // Thin equity, negative earnings and heavy current liabilities
        let mut current = period(1800.0, 200.0, -90.0);
        current.total_equity = Some(100.0);
        current.total_debt = Some(1500.0);
        current.retained_earnings = Some(-400.0);
        current.total_current_liabilities = Some(1400.0);
        current.ebit = Some(-60.0);
        let periods = vec![current];
        let snapshot = MarketSnapshot {
            market_cap: Some(200.0),
            ..MarketSnapshot::default()
        };
        let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));

        assert_eq!(report.altman.zone, Some(AltmanZone::Distress));
        assert!(report.beneish.m_score.is_none());
        // Negative margin 0.2, leverage 0.2, liquidity 0.2, ROE 0.15
        assert_relative_eq!(report.red_flag_score.unwrap(), 0.75, epsilon = 1e-12);
        assert_eq!(report.red_flag_risk, Some(RiskLevel::High));
        assert_relative_eq!(report.risk_score.unwrap(), 0.875, epsilon = 1e-12);
        assert_eq!(report.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_missing_total_assets_degrades_locally() {
        let current = FinancialPeriod {
            total_assets: None,
            ..period(1800.0, 200.0, 180.0)
        };
        let periods = vec![current, period(1600.0, 180.0, 150.0)];
        let snapshot = snapshot();
        let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));

        let indices = report.beneish.indices;
        assert!(indices.aqi.is_none());
        assert!(indices.lvgi.is_none());
        assert!(indices.tata.is_none());
        assert_relative_eq!(indices.sgi.unwrap(), 1800.0 / 1600.0, epsilon = 1e-12);
        assert!(report.beneish.m_score.is_none());
        assert!(report.beneish.manipulation_flag.is_none());

        let ratios = report.altman.ratios;
        assert!(ratios.x1.is_none());
        assert!(ratios.x3.is_none());
        assert!(ratios.x5.is_none());
        assert!(report.altman.z_score.is_none());
        assert!(!report.manipulation_flag());
    }

    #[test]
    fn test_single_period() {
        let periods = vec![period(1800.0, 200.0, 180.0)];
        let snapshot = MarketSnapshot::default();
        let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));

        assert!(report.beneish.readings.is_empty());
        assert!(report.beneish.m_score.is_none());
        // Altman only needs the current period, but market cap is missing
        assert!(report.altman.ratios.x1.is_some());
        assert!(report.altman.z_score.is_none());
        assert!(report.ownership.is_none());
    }

    #[test]
    fn test_no_periods() {
        let snapshot = MarketSnapshot::default();
        let report = ForensicScorer::default().score(&ForensicInput::new(&[], &snapshot));
        assert_eq!(report.periods_analyzed, 0);
        assert!(report.beneish.m_score.is_none());
        assert!(report.altman.z_score.is_none());
        assert!(report.red_flags.is_empty());
        assert_eq!(report.red_flag_checks, 0);
        assert!(report.red_flag_score.is_none());
        assert!(report.risk_score.is_none());
        assert!(report.risk_level.is_none());
        assert!(report.is_unavailable());
    }

    #[test]
    fn test_receivables_surge_flags_manipulation() {
        // Receivables balloon while cash conversion collapses
        let mut current = period(2400.0, 900.0, 400.0);
        current.operating_cash_flow = Some(-200.0);
        let periods = vec![current, period(1600.0, 150.0, 150.0)];
        let snapshot = snapshot();
        let report = ForensicScorer::default().score(&ForensicInput::new(&periods, &snapshot));

        assert!(report.manipulation_flag());
        assert_eq!(report.beneish.risk, Some(RiskLevel::High));
        assert_eq!(report.highest_risk(), RiskLevel::High);
    }

    #[test]
    fn test_custom_threshold() {
        let periods = vec![period(1800.0, 200.0, 180.0), period(1600.0, 180.0, 150.0)];
        let snapshot = snapshot();
        let scorer = ForensicScorer::new(ForensicConfig {
            m_score_threshold: -10.0,
            ..Default::default()
        });
        let report = scorer.score(&ForensicInput::new(&periods, &snapshot));
        assert!(report.manipulation_flag());
        assert_eq!(scorer.name(), "forensic");
    }
}
