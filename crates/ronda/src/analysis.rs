//! The end-to-end analysis entry point.

use ronda_combine::{OverallRisk, RiskAggregator};
use ronda_forensic::{ForensicInput, ForensicReport, ForensicScorer};
use ronda_news::{NewsReport, NewsScorer};
use ronda_patterns::{PatternDetector, PatternReport};
use ronda_traits::{
    FinancialPeriod, MarketSnapshot, NewsItem, PriceSeries, Result, RondaError, Scorer, Symbol,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalysisConfig;

/// Everything needed to analyze one symbol, in a serializable form.
///
/// This is the offline input format: a JSON document with these fields.
/// Only `symbol` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Ticker or company identifier.
    pub symbol: Symbol,
    /// Financial periods, most recent first.
    #[serde(default)]
    pub periods: Vec<FinancialPeriod>,
    /// Market capitalization, liabilities and ownership.
    #[serde(default)]
    pub snapshot: MarketSnapshot,
    /// Daily price history, if available.
    #[serde(default)]
    pub prices: Option<PriceSeries>,
    /// News items.
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

impl AnalysisInput {
    /// Parse an input document.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] if the JSON is malformed, including
    /// a price series that is not strictly ascending by date.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RondaError::InvalidData(e.to_string()))
    }

    /// Run the full analysis on this input.
    #[must_use]
    pub fn analyze(&self, config: &AnalysisConfig) -> Analysis {
        analyze(
            &self.symbol,
            &self.periods,
            self.prices.as_ref(),
            &self.news,
            &self.snapshot,
            config,
        )
    }
}

/// The complete analysis of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Analyzed symbol.
    pub symbol: Symbol,
    /// Accounting scores, red flags and ownership.
    pub forensic: ForensicReport,
    /// Price and volume patterns, `None` without price history.
    pub patterns: Option<PatternReport>,
    /// News sentiment and risk.
    pub news: NewsReport,
    /// Weighted overall risk.
    pub overall: OverallRisk,
}

/// Analyze one symbol.
///
/// Runs the forensic scorer, the pattern detector (when `prices` is given)
/// and the news scorer, then aggregates them. Missing inputs never fail the
/// run: they surface as unavailable sub-results and, for the pattern stage,
/// as a dropped component in the overall score.
///
/// # Example
///
/// ```
/// use ronda::{AnalysisConfig, analyze};
/// use ronda::traits::{MarketSnapshot, NewsItem, RiskLevel};
///
/// let news = [NewsItem::new("Auditor resigns amid fraud probe", "")];
/// let analysis = analyze(
///     "ACME",
///     &[],
///     None,
///     &news,
///     &MarketSnapshot::default(),
///     &AnalysisConfig::default(),
/// );
/// assert_eq!(analysis.news.risk_level, RiskLevel::High);
/// assert!(analysis.patterns.is_none());
/// ```
#[must_use]
pub fn analyze(
    symbol: &str,
    periods: &[FinancialPeriod],
    prices: Option<&PriceSeries>,
    news: &[NewsItem],
    snapshot: &MarketSnapshot,
    config: &AnalysisConfig,
) -> Analysis {
    info!(
        symbol,
        periods = periods.len(),
        bars = prices.map(PriceSeries::len),
        news = news.len(),
        "Starting analysis"
    );

    let forensic =
        ForensicScorer::new(config.forensic.clone()).score(&ForensicInput::new(periods, snapshot));

    let patterns = prices.map(|series| PatternDetector::new(config.patterns.clone()).score(series));
    if patterns.is_none() {
        debug!(symbol, "No price history, skipping pattern detection");
    }

    let news = NewsScorer::new(config.news.clone()).score(news);

    let overall =
        RiskAggregator::new(config.aggregator.clone()).aggregate(&forensic, &news, patterns.as_ref());

    info!(
        symbol,
        score = overall.score,
        level = %overall.level,
        "Analysis complete"
    );

    Analysis {
        symbol: symbol.to_string(),
        forensic,
        patterns,
        news,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_combine::Component;
    use ronda_traits::RiskLevel;

    #[test]
    fn test_empty_input_degrades_gracefully() {
        let analysis = AnalysisInput {
            symbol: "EMPTY".to_string(),
            ..Default::default()
        }
        .analyze(&AnalysisConfig::default());

        assert_eq!(analysis.symbol, "EMPTY");
        assert!(analysis.forensic.beneish.m_score.is_none());
        assert!(analysis.forensic.altman.z_score.is_none());
        assert!(analysis.patterns.is_none());
        assert_eq!(analysis.news.risk_level, RiskLevel::Low);
        assert!(analysis.overall.component(Component::Pattern).unwrap().value.is_none());
        assert!(analysis.overall.component(Component::Forensic).unwrap().value.is_none());
        assert_eq!(analysis.overall.level, RiskLevel::Low);
    }

    #[test]
    fn test_minimal_json_input() {
        let input = AnalysisInput::from_json(r#"{"symbol": "ACME"}"#).unwrap();
        assert_eq!(input.symbol, "ACME");
        assert!(input.periods.is_empty());
        assert!(input.prices.is_none());
    }

    #[test]
    fn test_unordered_prices_rejected() {
        let json = r#"{
            "symbol": "ACME",
            "prices": [
                {"date": "2024-01-03", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 1.0},
                {"date": "2024-01-02", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 1.0}
            ]
        }"#;
        assert!(matches!(AnalysisInput::from_json(json), Err(RondaError::InvalidData(_))));
    }
}
