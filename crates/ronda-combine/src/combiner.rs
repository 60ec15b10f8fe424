//! Weighted combination of component risk values.

use std::fmt;

use ndarray::Array1;
use ronda_traits::stats::safe_divide;
use serde::{Deserialize, Serialize};

/// The three risk components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Financial statement forensics.
    Forensic,
    /// News sentiment and risk keywords.
    News,
    /// Price and volume patterns.
    Pattern,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Forensic => "forensic",
            Self::News => "news",
            Self::Pattern => "pattern",
        };
        f.write_str(label)
    }
}

/// A normalized component value and its weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    /// Which component.
    pub component: Component,
    /// Risk in [0, 1], `None` when the component could not be computed.
    pub value: Option<f64>,
    /// Configured weight.
    pub weight: f64,
    /// Weight after rescaling over the available components.
    pub effective_weight: f64,
}

impl ComponentScore {
    /// A component score before rescaling.
    #[must_use]
    pub const fn new(component: Component, value: Option<f64>, weight: f64) -> Self {
        Self {
            component,
            value,
            weight,
            effective_weight: 0.0,
        }
    }
}

/// Rescale the weights of the available components to sum to one and
/// return the weighted sum.
///
/// Unavailable components get an effective weight of zero. Returns `None`
/// when no component is available or the available weights sum to zero.
///
/// # Examples
///
/// ```
/// use ronda_combine::{Component, ComponentScore, combine_weighted};
///
/// let mut scores = [
///     ComponentScore::new(Component::Forensic, Some(1.0), 0.5),
///     ComponentScore::new(Component::News, Some(0.5), 0.3),
///     ComponentScore::new(Component::Pattern, None, 0.2),
/// ];
/// let score = combine_weighted(&mut scores).unwrap();
/// assert!((score - (0.5 + 0.15) / 0.8).abs() < 1e-12);
/// assert_eq!(scores[2].effective_weight, 0.0);
/// ```
pub fn combine_weighted(scores: &mut [ComponentScore]) -> Option<f64> {
    let available = scores
        .iter()
        .filter(|s| s.value.is_some_and(f64::is_finite))
        .map(|s| s.weight)
        .sum::<f64>();

    if available <= 0.0 {
        for score in scores.iter_mut() {
            score.effective_weight = 0.0;
        }
        return None;
    }

    for score in scores.iter_mut() {
        score.effective_weight = match score.value {
            Some(v) if v.is_finite() => safe_divide(score.weight, available, 0.0),
            _ => 0.0,
        };
    }

    let weights: Array1<f64> = scores.iter().map(|s| s.effective_weight).collect();
    let values: Array1<f64> = scores
        .iter()
        .map(|s| s.value.filter(|v| v.is_finite()).unwrap_or(0.0))
        .collect();

    Some(weights.dot(&values))
}
