//! Frequency-based topic extraction.

use std::collections::{BTreeMap, HashSet};

use ronda_traits::NewsItem;
use serde::{Deserialize, Serialize};

use crate::{config::NewsConfig, keywords::words};

/// A frequent term across the news set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// The term.
    pub term: String,
    /// Occurrences across all titles and descriptions.
    pub frequency: usize,
}

/// Most frequent alphabetic words of at least `config.min_topic_len`
/// letters, excluding stop words. Ties are broken alphabetically.
#[must_use]
pub fn extract_topics(items: &[NewsItem], config: &NewsConfig) -> Vec<Topic> {
    let stop_words: HashSet<&str> = config.stop_words.iter().map(String::as_str).collect();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        for word in words(&item.text()) {
            if word.chars().count() >= config.min_topic_len
                && word.chars().all(char::is_alphabetic)
                && !stop_words.contains(word.as_str())
            {
                *counts.entry(word).or_default() += 1;
            }
        }
    }

    let mut topics: Vec<Topic> = counts
        .into_iter()
        .map(|(term, frequency)| Topic { term, frequency })
        .collect();
    // Stable sort keeps the alphabetical order from the map within ties
    topics.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    topics.truncate(config.topic_count);
    topics
}
