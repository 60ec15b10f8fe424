//! Data types for FMP API responses.
//!
//! Numeric fields are optional: FMP omits or nulls line items it does not
//! have, and the scorers need to tell those apart from a reported zero.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the news endpoints.
pub const NEWS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (FY, Q1..Q4).
    pub period: String,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Cost of revenue (COGS).
    pub cost_of_revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Selling, general and administrative expenses.
    pub selling_general_and_administrative_expenses: Option<f64>,
    /// Depreciation and amortization.
    pub depreciation_and_amortization: Option<f64>,
    /// Earnings before interest and taxes.
    pub ebit: Option<f64>,
    /// Operating income, used when EBIT is not reported.
    pub operating_income: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceSheet {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Net receivables.
    pub net_receivables: Option<f64>,
    /// Total current assets.
    pub total_current_assets: Option<f64>,
    /// Net property, plant and equipment.
    pub property_plant_equipment_net: Option<f64>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total current liabilities.
    pub total_current_liabilities: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Retained earnings.
    pub retained_earnings: Option<f64>,
    /// Total stockholders' equity.
    pub total_stockholders_equity: Option<f64>,
}

impl BalanceSheet {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CashFlowStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Depreciation and amortization.
    pub depreciation_and_amortization: Option<f64>,
}

impl CashFlowStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// Current price.
    pub price: Option<f64>,
    /// Market cap.
    pub market_cap: Option<f64>,
    /// Volume.
    pub volume: Option<f64>,
}

/// Free float data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharesFloat {
    /// Ticker symbol.
    pub symbol: String,
    /// As-of date.
    pub date: String,
    /// Free float as a percentage of outstanding shares.
    pub free_float: Option<f64>,
    /// Floating shares.
    pub float_shares: Option<f64>,
    /// Outstanding shares.
    pub outstanding_shares: Option<f64>,
}

impl SharesFloat {
    /// Closely held share of equity (100 - free float), used as the insider
    /// ownership estimate.
    #[must_use]
    pub fn closely_held_pct(&self) -> Option<f64> {
        self.free_float
            .filter(|f| (0.0..=100.0).contains(f))
            .map(|f| 100.0 - f)
    }
}

/// Historical daily price from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Stock news article from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockNews {
    /// Ticker symbol.
    pub symbol: Option<String>,
    /// Publication timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub published_date: String,
    /// Publisher name.
    pub publisher: Option<String>,
    /// Headline.
    pub title: String,
    /// Site the article appeared on.
    pub site: Option<String>,
    /// Article excerpt.
    pub text: Option<String>,
    /// Link to the article.
    pub url: Option<String>,
}

impl StockNews {
    /// Parse the publication timestamp.
    #[must_use]
    pub fn parsed_published(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.published_date, NEWS_TIMESTAMP_FORMAT).ok()
    }
}
