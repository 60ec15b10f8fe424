//! Data loading utilities for the Ronda CLI.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use ronda::fmp::FmpClient;
use ronda::traits::{
    FinancialPeriod, MarketData, MarketSnapshot, NewsItem, PriceSeries, Result as RondaResult,
    RondaError,
};
use tracing::{info, warn};

/// Everything fetched for one symbol. Failed fetches are already collapsed
/// into absent data.
#[derive(Debug, Default)]
pub(crate) struct FetchedData {
    pub(crate) periods: Vec<FinancialPeriod>,
    pub(crate) snapshot: MarketSnapshot,
    pub(crate) prices: Option<PriceSeries>,
    pub(crate) news: Vec<NewsItem>,
}

/// Fetch statements, snapshot, prices and news concurrently.
///
/// Every failure is logged and turned into absent data so the analysis can
/// still run on whatever arrived.
pub(crate) async fn fetch_symbol(
    client: &FmpClient,
    symbol: &str,
    statements: u32,
    from: NaiveDate,
    to: NaiveDate,
    news_limit: u32,
) -> FetchedData {
    let (periods, snapshot, prices, news) = tokio::join!(
        client.financial_periods(symbol, statements),
        client.market_snapshot(symbol),
        client.price_series(symbol, Some(from), Some(to)),
        client.stock_news(symbol, news_limit),
    );

    let periods = periods.unwrap_or_else(|e| {
        warn!(symbol, error = %e, "Financial statements unavailable");
        Vec::new()
    });
    let snapshot = snapshot.unwrap_or_else(|e| {
        warn!(symbol, error = %e, "Market snapshot unavailable");
        MarketSnapshot::default()
    });
    let prices = prices
        .inspect_err(|e| warn!(symbol, error = %e, "Price history unavailable"))
        .ok();
    let news = news.unwrap_or_else(|e| {
        warn!(symbol, error = %e, "News unavailable");
        Vec::new()
    });

    info!(
        symbol,
        periods = periods.len(),
        bars = prices.as_ref().map(PriceSeries::len),
        news = news.len(),
        "Data fetch complete"
    );

    FetchedData {
        periods,
        snapshot,
        prices,
        news,
    }
}

/// Load a daily OHLCV CSV file with `date,open,high,low,close,volume`
/// columns into a price series.
pub(crate) fn load_prices_csv(path: &Path) -> RondaResult<PriceSeries> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let series = MarketData::new(df).price_series()?;
    if series.is_empty() {
        return Err(RondaError::InsufficientData(format!(
            "no complete price rows in {}",
            path.display()
        )));
    }
    Ok(series)
}

/// Parse a look-back period like `1m`, `6m`, `1y` or `5y` into calendar days.
pub(crate) fn parse_period(period: &str) -> RondaResult<Duration> {
    let days = match period {
        "1m" => 30,
        "3m" => 90,
        "6m" => 180,
        "1y" => 365,
        "2y" => 730,
        "5y" => 1825,
        other => {
            return Err(RondaError::InvalidData(format!(
                "Unknown period '{other}' (expected 1m, 3m, 6m, 1y, 2y or 5y)"
            )));
        }
    };
    Ok(Duration::days(days))
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> RondaResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| RondaError::InvalidDate(format!("{date_str}: {e}")))
}
