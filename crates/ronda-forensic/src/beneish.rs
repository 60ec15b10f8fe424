//! Beneish M-Score earnings-manipulation model.
//!
//! The M-Score combines eight period-over-period indices computed from two
//! consecutive financial statements. Scores above [`MANIPULATION_THRESHOLD`]
//! place a company in the likely-manipulator region of Beneish (1999).
//!
//! # References
//!
//! Beneish, M. D. (1999). The Detection of Earnings Manipulation.
//! Financial Analysts Journal, 55(5), 24-36.

use std::fmt;

use ronda_traits::{
    FinancialPeriod, RiskLevel,
    stats::{period_over_period_ratio, ratio, safe_divide},
};
use serde::{Deserialize, Serialize};

/// Default M-Score cut-off above which manipulation is flagged.
pub const MANIPULATION_THRESHOLD: f64 = -2.22;

/// Model intercept.
pub const INTERCEPT: f64 = -4.84;

/// The eight Beneish indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BeneishIndex {
    /// Days sales in receivables index.
    Dsri,
    /// Gross margin index.
    Gmi,
    /// Asset quality index.
    Aqi,
    /// Sales growth index.
    Sgi,
    /// Depreciation index.
    Depi,
    /// Sales, general and administrative expenses index.
    Sgai,
    /// Leverage index.
    Lvgi,
    /// Total accruals to total assets.
    Tata,
}

impl BeneishIndex {
    /// All indices in model order.
    pub const ALL: [Self; 8] = [
        Self::Dsri,
        Self::Gmi,
        Self::Aqi,
        Self::Sgi,
        Self::Depi,
        Self::Sgai,
        Self::Lvgi,
        Self::Tata,
    ];

    /// Published model coefficient.
    #[must_use]
    pub const fn coefficient(&self) -> f64 {
        match self {
            Self::Dsri => 0.920,
            Self::Gmi => 0.528,
            Self::Aqi => 0.404,
            Self::Sgi => 0.892,
            Self::Depi => 0.115,
            Self::Sgai => -0.172,
            Self::Lvgi => -0.327,
            Self::Tata => 4.679,
        }
    }

    /// Mean value of the index in the manipulator sample of Beneish
    /// (1999). Readings at or above it are bucketed as HIGH.
    #[must_use]
    pub const fn manipulator_mean(&self) -> f64 {
        match self {
            Self::Dsri => 1.465,
            Self::Gmi => 1.193,
            Self::Aqi => 1.254,
            Self::Sgi => 1.607,
            Self::Depi => 1.077,
            Self::Sgai => 1.041,
            Self::Lvgi => 1.111,
            Self::Tata => 0.031,
        }
    }

    /// Short upper-case label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dsri => "DSRI",
            Self::Gmi => "GMI",
            Self::Aqi => "AQI",
            Self::Sgi => "SGI",
            Self::Depi => "DEPI",
            Self::Sgai => "SGAI",
            Self::Lvgi => "LVGI",
            Self::Tata => "TATA",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Dsri => "Days sales in receivables index",
            Self::Gmi => "Gross margin index",
            Self::Aqi => "Asset quality index",
            Self::Sgi => "Sales growth index",
            Self::Depi => "Depreciation index",
            Self::Sgai => "SG&A expenses index",
            Self::Lvgi => "Leverage index",
            Self::Tata => "Total accruals to total assets",
        }
    }

    /// Bucket a value of this index.
    #[must_use]
    pub fn risk(&self, value: f64) -> RiskLevel {
        if value >= self.manipulator_mean() {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for BeneishIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw index values. `None` marks an index whose inputs were missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BeneishIndices {
    /// Days sales in receivables index.
    pub dsri: Option<f64>,
    /// Gross margin index.
    pub gmi: Option<f64>,
    /// Asset quality index.
    pub aqi: Option<f64>,
    /// Sales growth index.
    pub sgi: Option<f64>,
    /// Depreciation index.
    pub depi: Option<f64>,
    /// SG&A expenses index.
    pub sgai: Option<f64>,
    /// Leverage index.
    pub lvgi: Option<f64>,
    /// Total accruals to total assets.
    pub tata: Option<f64>,
}

/// Period-over-period ratio of two optional per-period metrics.
fn index(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    Some(period_over_period_ratio(current?, prior?))
}

fn gross_margin(period: &FinancialPeriod) -> Option<f64> {
    ratio(period.gross_profit(), period.revenue)
}

fn asset_quality(period: &FinancialPeriod) -> Option<f64> {
    let hard_assets = period.total_current_assets? + period.net_ppe?;
    Some(1.0 - safe_divide(hard_assets, period.total_assets?, 0.0))
}

fn depreciation_rate(period: &FinancialPeriod) -> Option<f64> {
    let dep = period.depreciation_expense()?;
    Some(safe_divide(dep, dep + period.net_ppe?, 0.0))
}

fn accruals_to_assets(period: &FinancialPeriod) -> Option<f64> {
    let accruals = period.net_income? - period.operating_cash_flow?;
    Some(safe_divide(accruals, period.total_assets?, 0.0))
}

impl BeneishIndices {
    /// Compute all indices from the current and prior period.
    #[must_use]
    pub fn compute(current: &FinancialPeriod, prior: &FinancialPeriod) -> Self {
        let receivables_to_sales = |p: &FinancialPeriod| ratio(p.net_receivables, p.revenue);
        let sga_to_sales = |p: &FinancialPeriod| ratio(p.sga_expense, p.revenue);
        let leverage = |p: &FinancialPeriod| ratio(p.total_debt, p.total_assets);

        Self {
            dsri: index(receivables_to_sales(current), receivables_to_sales(prior)),
            // Inverted: a margin decline raises the index
            gmi: index(gross_margin(prior), gross_margin(current)),
            aqi: index(asset_quality(current), asset_quality(prior)),
            sgi: index(current.revenue, prior.revenue),
            depi: index(depreciation_rate(prior), depreciation_rate(current)),
            sgai: index(sga_to_sales(current), sga_to_sales(prior)),
            lvgi: index(leverage(current), leverage(prior)),
            tata: accruals_to_assets(current),
        }
    }

    /// Value of a single index.
    #[must_use]
    pub const fn get(&self, index: BeneishIndex) -> Option<f64> {
        match index {
            BeneishIndex::Dsri => self.dsri,
            BeneishIndex::Gmi => self.gmi,
            BeneishIndex::Aqi => self.aqi,
            BeneishIndex::Sgi => self.sgi,
            BeneishIndex::Depi => self.depi,
            BeneishIndex::Sgai => self.sgai,
            BeneishIndex::Lvgi => self.lvgi,
            BeneishIndex::Tata => self.tata,
        }
    }

    /// Indices that could not be computed.
    #[must_use]
    pub fn missing(&self) -> Vec<BeneishIndex> {
        BeneishIndex::ALL
            .into_iter()
            .filter(|i| self.get(*i).is_none())
            .collect()
    }

    /// The M-Score, or `None` unless all eight indices are available.
    #[must_use]
    pub fn m_score(&self) -> Option<f64> {
        BeneishIndex::ALL
            .iter()
            .try_fold(INTERCEPT, |acc, i| Some(acc + i.coefficient() * self.get(*i)?))
    }
}

/// One index value with its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexReading {
    /// Which index.
    pub index: BeneishIndex,
    /// Raw value.
    pub value: f64,
    /// Bucket relative to the manipulator-sample mean.
    pub risk: RiskLevel,
}

/// Beneish analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneishResult {
    /// Raw indices, including unavailable ones.
    pub indices: BeneishIndices,
    /// Bucketed readings for the available indices, in model order.
    pub readings: Vec<IndexReading>,
    /// Composite score, `None` on insufficient data.
    pub m_score: Option<f64>,
    /// Whether the score exceeds the threshold, `None` without a score.
    pub manipulation_flag: Option<bool>,
    /// HIGH when flagged, LOW when clear, `None` without a score.
    pub risk: Option<RiskLevel>,
    /// Plain-language summary.
    pub interpretation: String,
}

impl BeneishResult {
    /// Build the result from computed indices.
    #[must_use]
    pub fn from_indices(indices: BeneishIndices, threshold: f64) -> Self {
        let readings = BeneishIndex::ALL
            .into_iter()
            .filter_map(|index| {
                let value = indices.get(index)?;
                Some(IndexReading {
                    index,
                    value,
                    risk: index.risk(value),
                })
            })
            .collect();

        let m_score = indices.m_score();
        let manipulation_flag = m_score.map(|m| m > threshold);
        let risk = manipulation_flag.map(|flag| if flag { RiskLevel::High } else { RiskLevel::Low });

        let interpretation = match m_score {
            Some(m) if m > threshold => format!(
                "M-Score {m:.2} is above {threshold:.2}: likely earnings manipulator"
            ),
            Some(m) => format!(
                "M-Score {m:.2} is at or below {threshold:.2}: unlikely manipulator"
            ),
            None => {
                let missing: Vec<&str> = indices.missing().iter().map(BeneishIndex::label).collect();
                format!("Insufficient data (unavailable: {})", missing.join(", "))
            }
        };

        Self {
            indices,
            readings,
            m_score,
            manipulation_flag,
            risk,
            interpretation,
        }
    }

    /// Result for a history with fewer than two periods.
    #[must_use]
    pub fn unavailable(threshold: f64) -> Self {
        Self::from_indices(BeneishIndices::default(), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_indices() -> BeneishIndices {
        BeneishIndices {
            dsri: Some(1.0),
            gmi: Some(1.0),
            aqi: Some(1.0),
            sgi: Some(1.0),
            depi: Some(1.0),
            sgai: Some(1.0),
            lvgi: Some(1.0),
            tata: Some(1.0),
        }
    }

    fn period(revenue: f64, receivables: f64, total_assets: f64) -> FinancialPeriod {
        FinancialPeriod {
            revenue: Some(revenue),
            cost_of_revenue: Some(revenue * 0.6),
            net_receivables: Some(receivables),
            total_current_assets: Some(total_assets * 0.4),
            net_ppe: Some(total_assets * 0.3),
            total_assets: Some(total_assets),
            depreciation: Some(total_assets * 0.03),
            sga_expense: Some(revenue * 0.2),
            total_debt: Some(total_assets * 0.25),
            net_income: Some(revenue * 0.1),
            operating_cash_flow: Some(revenue * 0.12),
            ..Default::default()
        }
    }

    #[test]
    fn test_m_score_signed_coefficient_sum() {
        // -4.84 + 0.920 + 0.528 + 0.404 + 0.892 + 0.115 - 0.172 + 4.679 - 0.327
        let m = unit_indices().m_score().unwrap();
        assert_relative_eq!(m, 2.199, epsilon = 1e-9);
    }

    #[test]
    fn test_m_score_requires_all_indices() {
        let mut indices = unit_indices();
        indices.depi = None;
        assert!(indices.m_score().is_none());
        assert_eq!(indices.missing(), vec![BeneishIndex::Depi]);
    }

    #[test]
    fn test_identical_periods_are_neutral() {
        let p = period(1000.0, 150.0, 2000.0);
        let indices = BeneishIndices::compute(&p, &p);

        for index in BeneishIndex::ALL.into_iter().filter(|i| *i != BeneishIndex::Tata) {
            assert_relative_eq!(indices.get(index).unwrap(), 1.0, epsilon = 1e-12);
        }
        // (100 - 120) / 2000
        assert_relative_eq!(indices.tata.unwrap(), -0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_in_receivables_raises_dsri() {
        let prior = period(1000.0, 100.0, 2000.0);
        let current = period(1100.0, 220.0, 2000.0);
        let indices = BeneishIndices::compute(&current, &prior);

        // (220/1100) / (100/1000) = 2.0
        assert_relative_eq!(indices.dsri.unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(indices.sgi.unwrap(), 1.1, epsilon = 1e-12);
        assert_eq!(BeneishIndex::Dsri.risk(indices.dsri.unwrap()), RiskLevel::High);
    }

    #[test]
    fn test_margin_decline_raises_gmi() {
        let prior = period(1000.0, 100.0, 2000.0);
        let current = FinancialPeriod {
            cost_of_revenue: Some(800.0),
            ..period(1000.0, 100.0, 2000.0)
        };
        let indices = BeneishIndices::compute(&current, &prior);
        // 0.4 / 0.2
        assert_relative_eq!(indices.gmi.unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_total_assets() {
        let prior = period(1000.0, 100.0, 2000.0);
        let current = FinancialPeriod {
            total_assets: None,
            ..period(1200.0, 130.0, 2200.0)
        };
        let indices = BeneishIndices::compute(&current, &prior);

        assert!(indices.aqi.is_none());
        assert!(indices.lvgi.is_none());
        assert!(indices.tata.is_none());
        assert!(indices.m_score().is_none());
        assert_relative_eq!(indices.sgi.unwrap(), 1.2, epsilon = 1e-12);
        assert!(indices.dsri.is_some());
        assert!(indices.gmi.is_some());
    }

    #[test]
    fn test_zero_prior_revenue_is_neutral() {
        let prior = FinancialPeriod {
            revenue: Some(0.0),
            ..period(1000.0, 100.0, 2000.0)
        };
        let current = period(1000.0, 100.0, 2000.0);
        let indices = BeneishIndices::compute(&current, &prior);
        assert_relative_eq!(indices.sgi.unwrap(), 1.0);
    }

    #[test]
    fn test_result_flag_and_interpretation() {
        let result = BeneishResult::from_indices(unit_indices(), MANIPULATION_THRESHOLD);
        assert_eq!(result.manipulation_flag, Some(true));
        assert_eq!(result.risk, Some(RiskLevel::High));
        assert_eq!(result.readings.len(), 8);
        assert!(result.interpretation.contains("likely earnings manipulator"));

        let missing = BeneishResult::unavailable(MANIPULATION_THRESHOLD);
        assert!(missing.m_score.is_none());
        assert!(missing.manipulation_flag.is_none());
        assert!(missing.readings.is_empty());
        assert!(missing.interpretation.starts_with("Insufficient data"));
    }

    #[test]
    fn test_score_at_threshold_is_clear() {
        // Intercept plus TATA alone: choose TATA so that M equals the threshold
        let tata = (MANIPULATION_THRESHOLD - INTERCEPT) / BeneishIndex::Tata.coefficient();
        let indices = BeneishIndices {
            dsri: Some(0.0),
            gmi: Some(0.0),
            aqi: Some(0.0),
            sgi: Some(0.0),
            depi: Some(0.0),
            sgai: Some(0.0),
            lvgi: Some(0.0),
            tata: Some(tata),
        };
        let result = BeneishResult::from_indices(indices, indices.m_score().unwrap());
        assert_eq!(result.manipulation_flag, Some(false));
    }
}
