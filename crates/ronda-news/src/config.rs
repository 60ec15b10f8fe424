//! Keyword lists and scoring parameters.

use serde::{Deserialize, Serialize};

const HIGH_RISK: &[&str] = &[
    "fraud",
    "scandal",
    "investigation",
    "lawsuit",
    "bankruptcy",
    "default",
    "criminal",
    "sec investigation",
    "accounting irregularities",
    "restatement",
    "insider trading",
    "manipulation",
    "ponzi",
    "embezzlement",
    "corruption",
    "class action",
    "delisting",
    "going concern",
    "chapter 11",
    "insolvent",
];

const MEDIUM_RISK: &[&str] = &[
    "warning",
    "concern",
    "decline",
    "loss",
    "layoff",
    "restructuring",
    "downgrade",
    "miss",
    "disappointing",
    "weak",
    "struggle",
    "challenge",
    "regulatory",
    "compliance",
    "violation",
    "fine",
    "penalty",
    "dispute",
    "recall",
    "controversy",
    "criticism",
    "probe",
    "audit",
];

const LOW_RISK: &[&str] = &[
    "caution",
    "uncertainty",
    "volatility",
    "pressure",
    "slowdown",
    "competition",
    "headwind",
    "risk",
    "concern",
    "question",
];

const POSITIVE: &[&str] = &[
    "growth",
    "profit",
    "beat",
    "exceed",
    "strong",
    "positive",
    "upgrade",
    "expansion",
    "innovation",
    "success",
    "record",
    "breakthrough",
    "acquisition",
    "partnership",
    "award",
    "leadership",
    "momentum",
];

const NEGATIVE: &[&str] = &[
    "plunge",
    "slump",
    "drop",
    "fall",
    "cut",
    "downturn",
    "underperform",
    "selloff",
    "tumble",
    "slash",
];

const STOP_WORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "been", "will", "their", "about", "which", "were",
    "said", "what", "when", "where", "more", "than", "other", "some", "into", "could", "would",
    "should", "also",
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Configuration for the news scorer.
///
/// Keywords are lower-case phrases. A keyword matches when it appears at
/// the start of a word, so `"layoff"` also matches "layoffs".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Keywords that mark an item as critical.
    pub high_risk_keywords: Vec<String>,
    /// Keywords for medium-risk items.
    pub medium_risk_keywords: Vec<String>,
    /// Keywords for low-risk items.
    pub low_risk_keywords: Vec<String>,
    /// Keywords with positive sentiment.
    pub positive_keywords: Vec<String>,
    /// Keywords with negative sentiment that carry no risk tier.
    pub negative_keywords: Vec<String>,
    /// Number of topics to extract (default: 5)
    pub topic_count: usize,
    /// Minimum topic word length (default: 4)
    pub min_topic_len: usize,
    /// Words never reported as topics.
    pub stop_words: Vec<String>,
    /// Number of headlines echoed in the report (default: 5)
    pub headline_count: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            high_risk_keywords: owned(HIGH_RISK),
            medium_risk_keywords: owned(MEDIUM_RISK),
            low_risk_keywords: owned(LOW_RISK),
            positive_keywords: owned(POSITIVE),
            negative_keywords: owned(NEGATIVE),
            topic_count: 5,
            min_topic_len: 4,
            stop_words: owned(STOP_WORDS),
            headline_count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let config = NewsConfig::default();
        assert_eq!(config.high_risk_keywords.len(), 20);
        assert!(config.high_risk_keywords.iter().any(|k| k == "chapter 11"));
        assert!(config.medium_risk_keywords.iter().any(|k| k == "audit"));
        assert!(config.positive_keywords.iter().any(|k| k == "momentum"));
        assert_eq!(config.topic_count, 5);
    }

    #[test]
    fn test_override_single_list() {
        let config: NewsConfig = serde_json::from_str(r#"{"high_risk_keywords": ["recall"]}"#).unwrap();
        assert_eq!(config.high_risk_keywords, vec!["recall".to_string()]);
        assert_eq!(config.low_risk_keywords.len(), 10);
    }
}
