//! Financial statement snapshots and market context.
//!
//! Every line item is optional. `None` means the provider did not report the
//! item; it is never conflated with a reported zero, which lets the scorers
//! tell an unavailable index apart from a degenerate one.

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Line items for one reporting period, combined across the income
/// statement, balance sheet and cash flow statement.
///
/// Sequences of periods are ordered most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialPeriod {
    /// End date of the reporting period.
    pub period_end: Option<Date>,
    /// Total revenue (sales).
    pub revenue: Option<f64>,
    /// Cost of revenue (COGS).
    pub cost_of_revenue: Option<f64>,
    /// Gross profit, when reported directly.
    pub gross_profit: Option<f64>,
    /// Net accounts receivable.
    pub net_receivables: Option<f64>,
    /// Total current assets.
    pub total_current_assets: Option<f64>,
    /// Net property, plant and equipment.
    pub net_ppe: Option<f64>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Depreciation (and amortization) expense. Sign is ignored.
    pub depreciation: Option<f64>,
    /// Selling, general and administrative expense.
    pub sga_expense: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total current liabilities.
    pub total_current_liabilities: Option<f64>,
    /// Retained earnings.
    pub retained_earnings: Option<f64>,
    /// Earnings before interest and taxes.
    pub ebit: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Cash flow from operations.
    pub operating_cash_flow: Option<f64>,
    /// Total shareholders' equity.
    pub total_equity: Option<f64>,
}

impl FinancialPeriod {
    /// Gross profit, derived from revenue and cost of revenue when not
    /// reported directly.
    #[must_use]
    pub fn gross_profit(&self) -> Option<f64> {
        self.gross_profit
            .or_else(|| Some(self.revenue? - self.cost_of_revenue?))
    }

    /// Working capital: current assets minus current liabilities.
    #[must_use]
    pub fn working_capital(&self) -> Option<f64> {
        Some(self.total_current_assets? - self.total_current_liabilities?)
    }

    /// Depreciation as a positive expense.
    #[must_use]
    pub fn depreciation_expense(&self) -> Option<f64> {
        self.depreciation.map(f64::abs)
    }
}

/// Ownership percentages and short interest for a symbol.
///
/// Percentages are expressed on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ownership {
    /// Share of equity held by insiders.
    pub insider_pct: Option<f64>,
    /// Share of equity held by institutions.
    pub institutional_pct: Option<f64>,
    /// Share of insider holdings pledged as collateral.
    pub pledged_pct: Option<f64>,
    /// Short interest expressed as days to cover.
    pub short_ratio: Option<f64>,
}

impl Ownership {
    /// Whether no ownership field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.insider_pct.is_none()
            && self.institutional_pct.is_none()
            && self.pledged_pct.is_none()
            && self.short_ratio.is_none()
    }
}

/// Market context needed alongside the statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSnapshot {
    /// Current market capitalization.
    pub market_cap: Option<f64>,
    /// Current total liabilities, overriding the latest period's value.
    pub total_liabilities: Option<f64>,
    /// Ownership breakdown, when available.
    pub ownership: Option<Ownership>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_profit_fallback() {
        let reported = FinancialPeriod {
            revenue: Some(100.0),
            cost_of_revenue: Some(60.0),
            gross_profit: Some(45.0),
            ..Default::default()
        };
        assert_eq!(reported.gross_profit(), Some(45.0));

        let derived = FinancialPeriod {
            revenue: Some(100.0),
            cost_of_revenue: Some(60.0),
            ..Default::default()
        };
        assert_eq!(derived.gross_profit(), Some(40.0));

        let missing = FinancialPeriod {
            revenue: Some(100.0),
            ..Default::default()
        };
        assert_eq!(missing.gross_profit(), None);
    }

    #[test]
    fn test_working_capital_and_depreciation() {
        let period = FinancialPeriod {
            total_current_assets: Some(50.0),
            total_current_liabilities: Some(80.0),
            depreciation: Some(-12.0),
            ..Default::default()
        };
        assert_eq!(period.working_capital(), Some(-30.0));
        assert_eq!(period.depreciation_expense(), Some(12.0));
    }

    #[test]
    fn test_missing_fields_deserialize_as_absent() {
        let period: FinancialPeriod = serde_json::from_str(r#"{"revenue": 0.0}"#).unwrap();
        assert_eq!(period.revenue, Some(0.0));
        assert_eq!(period.total_assets, None);
    }

    #[test]
    fn test_ownership_is_empty() {
        assert!(Ownership::default().is_empty());
        let ownership = Ownership {
            short_ratio: Some(3.0),
            ..Default::default()
        };
        assert!(!ownership.is_empty());
    }
}
