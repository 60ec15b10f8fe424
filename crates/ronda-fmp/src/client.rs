//! FMP API client implementation.

use crate::{
    Result,
    convert::merge_statements,
    error::FmpError,
    types::{
        BalanceSheet, CashFlowStatement, HistoricalPrice, IncomeStatement, Period, Quote,
        SharesFloat, StockNews,
    },
};
use reqwest::Client;
use ronda_traits::{Date, FinancialPeriod, MarketSnapshot, NewsItem, Ownership, PriceSeries};
use std::env;
use tracing::{debug, info, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "No .env file loaded");
        }

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Error payloads arrive with a 200 status
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn statement_endpoint(
        statement: &str,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> String {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        format!(
            "{statement}?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        )
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        self.get(&Self::statement_endpoint("income-statement", symbol, period, limit))
            .await
    }

    /// Get balance sheets for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        self.get(&Self::statement_endpoint(
            "balance-sheet-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get cash flow statements for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        self.get(&Self::statement_endpoint(
            "cash-flow-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get free float data for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no record is returned.
    pub async fn shares_float(&self, symbol: &str) -> Result<SharesFloat> {
        let endpoint = format!("shares-float?symbol={}", symbol.to_uppercase());
        let records: Vec<SharesFloat> = self.get(&endpoint).await?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::NoData(format!("{symbol} shares float")))
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date
    /// * `to` - End date
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = String::new();
        if let Some(f) = from {
            params.push_str(&format!("&from={}", f.format("%Y-%m-%d")));
        }
        if let Some(t) = to {
            params.push_str(&format!("&to={}", t.format("%Y-%m-%d")));
        }

        let endpoint = format!(
            "historical-price-eod/full?symbol={}{}",
            symbol.to_uppercase(),
            params
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get recent news articles for a symbol, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn news(&self, symbol: &str, limit: u32) -> Result<Vec<StockNews>> {
        let endpoint = format!(
            "news/stock?symbols={}&limit={limit}",
            symbol.to_uppercase()
        );
        self.get(&endpoint).await
    }

    /// Fetch annual statements and merge them into financial periods, most
    /// recent first.
    ///
    /// The three statements are fetched concurrently. A failed balance sheet
    /// or cash flow request leaves its line items absent; a failed income
    /// statement request fails the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the income statement request fails or no period
    /// could be assembled.
    pub async fn financial_periods(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<FinancialPeriod>> {
        let (income, balance, cash) = tokio::join!(
            self.income_statement(symbol, Period::Annual, Some(limit)),
            self.balance_sheet(symbol, Period::Annual, Some(limit)),
            self.cash_flow(symbol, Period::Annual, Some(limit)),
        );

        let income = income?;
        let balance = balance.unwrap_or_else(|e| {
            warn!(symbol, error = %e, "Balance sheet fetch failed");
            Vec::new()
        });
        let cash = cash.unwrap_or_else(|e| {
            warn!(symbol, error = %e, "Cash flow fetch failed");
            Vec::new()
        });

        let periods = merge_statements(&income, &balance, &cash);
        if periods.is_empty() {
            return Err(FmpError::NoData(format!("{symbol} financial statements")));
        }

        info!(symbol, periods = periods.len(), "Fetched financial periods");
        Ok(periods)
    }

    /// Build the market snapshot: market cap from the quote, total
    /// liabilities from the latest balance sheet and an ownership estimate
    /// from the free float.
    ///
    /// Each part is fetched concurrently and is left absent when its request
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::NoData`] when every part failed.
    pub async fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot> {
        let (quote, balance, float) = tokio::join!(
            self.quote(symbol),
            self.balance_sheet(symbol, Period::Annual, Some(1)),
            self.shares_float(symbol),
        );

        let market_cap = match quote {
            Ok(q) => q.market_cap,
            Err(e) => {
                warn!(symbol, error = %e, "Quote fetch failed");
                None
            }
        };
        let total_liabilities = match balance {
            Ok(sheets) => sheets.first().and_then(|b| b.total_liabilities),
            Err(e) => {
                warn!(symbol, error = %e, "Balance sheet fetch failed");
                None
            }
        };
        let ownership = match float {
            Ok(f) => Some(Ownership {
                insider_pct: f.closely_held_pct(),
                ..Default::default()
            })
            .filter(|o| !o.is_empty()),
            Err(e) => {
                debug!(symbol, error = %e, "Shares float unavailable");
                None
            }
        };

        let snapshot = MarketSnapshot {
            market_cap,
            total_liabilities,
            ownership,
        };
        if snapshot == MarketSnapshot::default() {
            return Err(FmpError::NoData(format!("{symbol} market snapshot")));
        }
        Ok(snapshot)
    }

    /// Fetch daily prices between `from` and `to` as a price series.
    ///
    /// Bars with an unparseable date are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no bar is returned.
    pub async fn price_series(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<PriceSeries> {
        let prices = self.historical_prices(symbol, from, to).await?;
        let series = PriceSeries::from_unordered(prices.iter().filter_map(HistoricalPrice::to_bar));
        if series.is_empty() {
            return Err(FmpError::NoData(format!("{symbol} prices")));
        }

        info!(symbol, bars = series.len(), "Fetched price history");
        Ok(series)
    }

    /// Fetch recent news as news items.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn stock_news(&self, symbol: &str, limit: u32) -> Result<Vec<NewsItem>> {
        let articles = self.news(symbol, limit).await?;
        let items: Vec<NewsItem> = articles.into_iter().map(NewsItem::from).collect();

        info!(symbol, items = items.len(), "Fetched news");
        Ok(items)
    }
}
