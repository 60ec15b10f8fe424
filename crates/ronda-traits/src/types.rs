//! Common types used throughout the Ronda toolkit.
//!
//! This module defines the price and news inputs consumed by the scorers,
//! together with the polars-backed [`MarketData`] container used when price
//! history arrives as a data frame.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Result, RondaError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker like "AAPL".
pub type Symbol = String;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01, the polars date epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Columns a frame must carry to be converted into a [`PriceSeries`].
pub const PRICE_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// One daily OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: Date,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

/// A chronologically ascending price history with unique dates.
///
/// Gaps between dates (weekends, holidays) are allowed. The ordering
/// invariant is enforced on construction, including when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create a series from bars that are already strictly ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] if two consecutive bars are out of
    /// order or share a date.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if let Some(w) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(RondaError::InvalidData(format!(
                "price bars must be strictly ascending by date: {} followed by {}",
                w[0].date, w[1].date
            )));
        }
        Ok(Self { bars })
    }

    /// Create a series from bars in any order.
    ///
    /// Bars are sorted by date; when a date appears more than once the last
    /// occurrence wins.
    #[must_use]
    pub fn from_unordered(bars: impl IntoIterator<Item = PriceBar>) -> Self {
        let by_date: BTreeMap<Date, PriceBar> = bars.into_iter().map(|b| (b.date, b)).collect();
        Self {
            bars: by_date.into_values().collect(),
        }
    }

    /// The bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes, oldest first.
    #[must_use]
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Date of the first bar.
    #[must_use]
    pub fn start_date(&self) -> Option<Date> {
        self.bars.first().map(|b| b.date)
    }

    /// Date of the last bar.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.bars.last().map(|b| b.date)
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = RondaError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

/// A news record for a symbol or company-name query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Summary or body excerpt.
    #[serde(default)]
    pub description: String,
    /// Publisher or site name.
    #[serde(default)]
    pub source: String,
    /// Publication timestamp, when known.
    #[serde(default)]
    pub published: Option<NaiveDateTime>,
    /// Link to the article.
    #[serde(default)]
    pub url: Option<String>,
}

impl NewsItem {
    /// Create a news item from a title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Title and description joined for keyword scanning.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Container for market data.
///
/// `MarketData` wraps a Polars DataFrame holding daily price history. It is
/// the entry point for CSV and other frame-shaped inputs, which are turned
/// into a validated [`PriceSeries`] with [`MarketData::price_series`].
///
/// # Expected Schema
///
/// - `date`: Trading date (date or `YYYY-MM-DD` string)
/// - `open`, `high`, `low`, `close`: Price data
/// - `volume`: Trading volume (integer or float)
#[derive(Debug, Clone)]
pub struct MarketData {
    /// The underlying DataFrame containing market data.
    data: DataFrame,
}

impl MarketData {
    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Returns the number of rows in the market data.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists in the market data.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Convert the frame into a [`PriceSeries`].
    ///
    /// Rows with a null in any price column are skipped. Rows are sorted by
    /// date and duplicate dates keep the last row.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or cannot be cast to
    /// the expected type.
    pub fn price_series(&self) -> Result<PriceSeries> {
        for col in PRICE_COLUMNS {
            if !self.has_column(col) {
                return Err(RondaError::MissingColumn(col.to_string()));
            }
        }

        let date_series = self
            .data
            .column("date")?
            .as_materialized_series()
            .cast(&DataType::Date)?;
        let dates: Vec<Option<Date>> = date_series
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
            })
            .collect();

        let open = self.f64_column("open")?;
        let high = self.f64_column("high")?;
        let low = self.f64_column("low")?;
        let close = self.f64_column("close")?;
        let volume = self.f64_column("volume")?;

        let bars = (0..dates.len()).filter_map(|i| {
            Some(PriceBar {
                date: dates[i]?,
                open: open[i]?,
                high: high[i]?,
                low: low[i]?,
                close: close[i]?,
                volume: volume[i]?,
            })
        });

        Ok(PriceSeries::from_unordered(bars))
    }

    fn f64_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self
            .data
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().collect())
    }
}

impl From<DataFrame> for MarketData {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: Date::from_ymd_opt(y, m, d).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_price_series_accepts_ascending_with_gaps() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 5, 10.0),
            bar(2024, 1, 8, 11.0),
            bar(2024, 1, 9, 12.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.start_date(), Date::from_ymd_opt(2024, 1, 5));
        assert_eq!(series.end_date(), Date::from_ymd_opt(2024, 1, 9));
    }

    #[test]
    fn test_price_series_rejects_duplicates_and_disorder() {
        let dup = PriceSeries::new(vec![bar(2024, 1, 5, 10.0), bar(2024, 1, 5, 11.0)]);
        assert!(matches!(dup, Err(RondaError::InvalidData(_))));

        let unordered = PriceSeries::new(vec![bar(2024, 1, 8, 10.0), bar(2024, 1, 5, 11.0)]);
        assert!(matches!(unordered, Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_price_series_from_unordered() {
        let series = PriceSeries::from_unordered(vec![
            bar(2024, 1, 9, 12.0),
            bar(2024, 1, 5, 10.0),
            bar(2024, 1, 9, 13.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 13.0]);
    }

    #[test]
    fn test_price_series_deserialize_validates() {
        let json = r#"[
            {"date":"2024-01-08","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":5.0},
            {"date":"2024-01-05","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":5.0}
        ]"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());
    }

    #[test]
    fn test_news_item_text() {
        let item = NewsItem::new("Acme beats estimates", "Record quarter");
        assert_eq!(item.text(), "Acme beats estimates Record quarter");
        assert!(item.published.is_none());
    }

    #[test]
    fn test_market_data_price_series() {
        let df = df! {
            "date" => &["2024-01-03", "2024-01-02", "2024-01-04"],
            "open" => &[10.0, 9.0, 11.0],
            "high" => &[10.5, 9.5, 11.5],
            "low" => &[9.5, 8.5, 10.5],
            "close" => &[10.2, 9.2, 11.2],
            "volume" => &[1500_i64, 1000, 2000],
        }
        .unwrap();

        let series = MarketData::new(df).price_series().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![9.2, 10.2, 11.2]);
        assert_eq!(series.volumes(), vec![1000.0, 1500.0, 2000.0]);
    }

    #[test]
    fn test_market_data_missing_column() {
        let df = df! {
            "date" => &["2024-01-02"],
            "close" => &[10.0],
        }
        .unwrap();

        let err = MarketData::from(df).price_series().unwrap_err();
        assert!(matches!(err, RondaError::MissingColumn(ref c) if c == "open"));
    }
}
