//! Aggregation of per-item classifications into a news report.

use chrono::NaiveDateTime;
use ronda_traits::{NewsItem, RiskLevel, Scorer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::NewsConfig,
    keywords::{ItemAssessment, Sentiment, assess},
    topics::{Topic, extract_topics},
};

/// An item that matched at least one high-risk keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalItem {
    /// Headline.
    pub title: String,
    /// Link, when known.
    pub url: Option<String>,
    /// Publication time, when known.
    pub published: Option<NaiveDateTime>,
    /// The high-risk keywords found.
    pub keywords: Vec<String>,
}

/// News analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsReport {
    /// Number of items scored.
    pub items_analyzed: usize,
    /// Plurality sentiment across items.
    pub sentiment: Sentiment,
    /// (positive items - negative items) / items, 0 for no items.
    pub sentiment_score: f64,
    /// Items classified positive.
    pub positive_count: usize,
    /// Items classified negative.
    pub negative_count: usize,
    /// Items classified neutral.
    pub neutral_count: usize,
    /// Highest risk tier across items.
    pub risk_level: RiskLevel,
    /// Number of items with a high-risk match.
    pub critical_count: usize,
    /// Items with a high-risk match, in input order.
    pub critical_items: Vec<CriticalItem>,
    /// Most frequent terms.
    pub topics: Vec<Topic>,
    /// Keyword density score in [0, 1].
    pub keyword_risk_score: f64,
    /// The first few headlines, in input order.
    pub headlines: Vec<String>,
}

/// Plurality vote. Any tie for first place is NEUTRAL.
fn vote(positive: usize, negative: usize, neutral: usize) -> Sentiment {
    if positive > negative && positive > neutral {
        Sentiment::Positive
    } else if negative > positive && negative > neutral {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Scores a news set by keyword presence.
///
/// # Example
///
/// ```
/// use ronda_news::{NewsScorer, Sentiment};
/// use ronda_traits::{RiskLevel, Scorer};
///
/// let report = NewsScorer::default().score(&[]);
/// assert_eq!(report.sentiment, Sentiment::Neutral);
/// assert_eq!(report.risk_level, RiskLevel::Low);
/// assert_eq!(report.critical_count, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewsScorer {
    config: NewsConfig,
}

impl NewsScorer {
    /// Create a scorer with the given configuration.
    #[must_use]
    pub const fn new(config: NewsConfig) -> Self {
        Self { config }
    }

    /// The scorer's configuration.
    #[must_use]
    pub const fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Classify a single item.
    #[must_use]
    pub fn assess(&self, item: &NewsItem) -> ItemAssessment {
        assess(item, &self.config)
    }
}

impl Scorer for NewsScorer {
    type Input<'a> = [NewsItem];
    type Report = NewsReport;

    fn name(&self) -> &str {
        "news"
    }

    fn score(&self, items: &[NewsItem]) -> NewsReport {
        if items.is_empty() {
            debug!("No news items to score");
        }

        let assessments: Vec<ItemAssessment> = items.iter().map(|i| self.assess(i)).collect();

        let count = |s: Sentiment| assessments.iter().filter(|a| a.sentiment == s).count();
        let positive_count = count(Sentiment::Positive);
        let negative_count = count(Sentiment::Negative);
        let neutral_count = count(Sentiment::Neutral);

        let total = items.len();
        let sentiment_score = if total == 0 {
            0.0
        } else {
            (positive_count as f64 - negative_count as f64) / total as f64
        };

        let risk_level = assessments
            .iter()
            .filter_map(|a| a.tier)
            .max()
            .unwrap_or(RiskLevel::Low);

        let critical_items: Vec<CriticalItem> = items
            .iter()
            .zip(&assessments)
            .filter(|(_, a)| !a.high_risk.is_empty())
            .map(|(item, a)| CriticalItem {
                title: item.title.clone(),
                url: item.url.clone(),
                published: item.published,
                keywords: a.high_risk.clone(),
            })
            .collect();

        let (high, medium, low) = assessments.iter().map(ItemAssessment::tier_hits).fold(
            (0, 0, 0),
            |(h, m, l), (dh, dm, dl)| (h + dh, m + dm, l + dl),
        );
        let keyword_risk_score = if total == 0 {
            0.0
        } else {
            ((0.5 * high as f64 + 0.3 * medium as f64 + 0.1 * low as f64) / total as f64).min(1.0)
        };

        let report = NewsReport {
            items_analyzed: total,
            sentiment: vote(positive_count, negative_count, neutral_count),
            sentiment_score,
            positive_count,
            negative_count,
            neutral_count,
            risk_level,
            critical_count: critical_items.len(),
            critical_items,
            topics: extract_topics(items, &self.config),
            keyword_risk_score,
            headlines: items
                .iter()
                .take(self.config.headline_count)
                .map(|i| i.title.clone())
                .collect(),
        };

        info!(
            items = total,
            sentiment = report.sentiment.as_str(),
            risk = %report.risk_level,
            critical = report.critical_count,
            "News analysis complete"
        );

        report
    }
}
