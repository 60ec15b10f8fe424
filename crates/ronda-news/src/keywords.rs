//! Keyword matching and per-item classification.

use ronda_traits::{NewsItem, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::config::NewsConfig;

/// Sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    /// Favourable coverage.
    Positive,
    /// Unfavourable coverage.
    Negative,
    /// Balanced or keyword-free coverage.
    Neutral,
}

impl Sentiment {
    /// Upper-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

/// Lower-cased text reduced to alphanumeric words separated by single
/// spaces, with a leading space so every word starts after a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize arbitrary text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut normalized = String::with_capacity(text.len() + 1);
        for word in words(text) {
            normalized.push(' ');
            normalized.push_str(&word);
        }
        Self(normalized)
    }

    /// Whether `keyword` occurs starting at a word boundary.
    ///
    /// The keyword is normalized the same way as the text, so multi-word
    /// phrases match across any run of whitespace or punctuation.
    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        let needle = Self::new(keyword);
        !needle.0.is_empty() && self.0.contains(&needle.0)
    }

    /// Keywords from `list` present in the text, in list order.
    #[must_use]
    pub fn matches(&self, list: &[String]) -> Vec<String> {
        list.iter().filter(|k| self.contains(k)).cloned().collect()
    }
}

/// Lower-case alphanumeric words of `text`.
pub(crate) fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Classification of a single news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAssessment {
    /// Item sentiment.
    pub sentiment: Sentiment,
    /// Highest matched risk tier, `None` when no risk keyword matched.
    pub tier: Option<RiskLevel>,
    /// Matched high-risk keywords.
    pub high_risk: Vec<String>,
    /// Matched medium-risk keywords.
    pub medium_risk: Vec<String>,
    /// Matched low-risk keywords.
    pub low_risk: Vec<String>,
    /// Number of matched positive keywords.
    pub positive: usize,
    /// Number of matched negative keywords.
    pub negative: usize,
}

impl ItemAssessment {
    /// Keyword hits in the item's own tier only, as (high, medium, low).
    ///
    /// Lower tiers are not counted once a higher tier matched.
    #[must_use]
    pub fn tier_hits(&self) -> (usize, usize, usize) {
        match self.tier {
            Some(RiskLevel::High) => (self.high_risk.len(), 0, 0),
            Some(RiskLevel::Medium) => (0, self.medium_risk.len(), 0),
            Some(RiskLevel::Low) => (0, 0, self.low_risk.len()),
            None => (0, 0, 0),
        }
    }
}

/// Classify one item.
///
/// Priority is fixed: a high-risk match makes the item HIGH tier and
/// NEGATIVE regardless of other keywords. Otherwise the tier is the highest
/// matched of medium and low, and sentiment compares a negative weight
/// (2 per medium, 1 per low, 2 per negative keyword) with a positive weight
/// (2 per positive keyword). Equal weights are NEUTRAL.
#[must_use]
pub fn assess(item: &NewsItem, config: &NewsConfig) -> ItemAssessment {
    let text = NormalizedText::new(&item.text());

    let high_risk = text.matches(&config.high_risk_keywords);
    let medium_risk = text.matches(&config.medium_risk_keywords);
    let low_risk = text.matches(&config.low_risk_keywords);
    let positive = text.matches(&config.positive_keywords).len();
    let negative = text.matches(&config.negative_keywords).len();

    let tier = if !high_risk.is_empty() {
        Some(RiskLevel::High)
    } else if !medium_risk.is_empty() {
        Some(RiskLevel::Medium)
    } else if !low_risk.is_empty() {
        Some(RiskLevel::Low)
    } else {
        None
    };

    let sentiment = if !high_risk.is_empty() {
        Sentiment::Negative
    } else {
        let negative_weight = 2 * medium_risk.len() + low_risk.len() + 2 * negative;
        let positive_weight = 2 * positive;
        match negative_weight.cmp(&positive_weight) {
            std::cmp::Ordering::Greater => Sentiment::Negative,
            std::cmp::Ordering::Less => Sentiment::Positive,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    };

    ItemAssessment {
        sentiment,
        tier,
        high_risk,
        medium_risk,
        low_risk,
        positive,
        negative,
    }
}
