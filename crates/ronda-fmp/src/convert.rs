//! Conversion of FMP responses into the Ronda data model.

use std::collections::BTreeMap;

use ronda_traits::{FinancialPeriod, NewsItem, PriceBar};
use tracing::debug;

use crate::types::{BalanceSheet, CashFlowStatement, HistoricalPrice, IncomeStatement, StockNews};

/// Join income statements, balance sheets and cash flow statements on their
/// period end date.
///
/// A period is emitted for every date that appears in any of the three
/// inputs; line items from a missing statement stay `None`. Statements with
/// an unparseable date are skipped. The result is ordered most recent first.
#[must_use]
pub fn merge_statements(
    income: &[IncomeStatement],
    balance: &[BalanceSheet],
    cash_flow: &[CashFlowStatement],
) -> Vec<FinancialPeriod> {
    let mut periods: BTreeMap<_, FinancialPeriod> = BTreeMap::new();

    for statement in income {
        let Some(date) = statement.parsed_date() else {
            debug!(date = %statement.date, "Skipping income statement with bad date");
            continue;
        };
        let period = periods.entry(date).or_default();
        period.revenue = statement.revenue;
        period.cost_of_revenue = statement.cost_of_revenue;
        period.gross_profit = statement.gross_profit;
        period.sga_expense = statement.selling_general_and_administrative_expenses;
        period.ebit = statement.ebit.or(statement.operating_income);
        period.net_income = statement.net_income;
        period.depreciation = period
            .depreciation
            .or(statement.depreciation_and_amortization);
    }

    for statement in balance {
        let Some(date) = statement.parsed_date() else {
            debug!(date = %statement.date, "Skipping balance sheet with bad date");
            continue;
        };
        let period = periods.entry(date).or_default();
        period.net_receivables = statement.net_receivables;
        period.total_current_assets = statement.total_current_assets;
        period.net_ppe = statement.property_plant_equipment_net;
        period.total_assets = statement.total_assets;
        period.total_current_liabilities = statement.total_current_liabilities;
        period.total_liabilities = statement.total_liabilities;
        period.total_debt = statement.total_debt;
        period.retained_earnings = statement.retained_earnings;
        period.total_equity = statement.total_stockholders_equity;
    }

    for statement in cash_flow {
        let Some(date) = statement.parsed_date() else {
            debug!(date = %statement.date, "Skipping cash flow statement with bad date");
            continue;
        };
        let period = periods.entry(date).or_default();
        period.operating_cash_flow = statement.operating_cash_flow;
        // The cash flow figure takes precedence over the income statement's
        if statement.depreciation_and_amortization.is_some() {
            period.depreciation = statement.depreciation_and_amortization;
        }
    }

    periods
        .into_iter()
        .rev()
        .map(|(date, mut period)| {
            period.period_end = Some(date);
            period
        })
        .collect()
}

impl HistoricalPrice {
    /// Convert into a price bar, `None` when the date does not parse.
    #[must_use]
    pub fn to_bar(&self) -> Option<PriceBar> {
        Some(PriceBar {
            date: self.parsed_date()?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

impl From<StockNews> for NewsItem {
    fn from(news: StockNews) -> Self {
        let published = news.parsed_published();
        Self {
            title: news.title,
            description: news.text.unwrap_or_default(),
            source: news.publisher.or(news.site).unwrap_or_default(),
            published,
            url: news.url,
        }
    }
}
