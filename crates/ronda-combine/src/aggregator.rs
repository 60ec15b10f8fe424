//! Overall risk from the forensic, news and pattern reports.

use ronda_forensic::{AltmanZone, ForensicReport};
use ronda_news::NewsReport;
use ronda_patterns::PatternReport;
use ronda_traits::{RiskLevel, stats::safe_divide};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combiner::{Component, ComponentScore, combine_weighted};

/// Component weights. They are rescaled over the available components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    /// Forensic weight (default: 0.5)
    pub forensic: f64,
    /// News weight (default: 0.3)
    pub news: f64,
    /// Pattern weight (default: 0.2)
    pub pattern: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            forensic: 0.5,
            news: 0.3,
            pattern: 0.2,
        }
    }
}

/// Component value assigned to each news risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsRiskValues {
    /// LOW news risk (default: 0.2)
    pub low: f64,
    /// MEDIUM news risk (default: 0.5)
    pub medium: f64,
    /// HIGH news risk (default: 0.9)
    pub high: f64,
}

impl Default for NewsRiskValues {
    fn default() -> Self {
        Self {
            low: 0.2,
            medium: 0.5,
            high: 0.9,
        }
    }
}

impl NewsRiskValues {
    /// Value for a risk level.
    #[must_use]
    pub const fn value(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

/// Forensic component floor implied by each Altman zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneRiskValues {
    /// Safe zone (default: 0.0)
    pub safe: f64,
    /// Grey zone (default: 0.5)
    pub grey: f64,
    /// Distress zone (default: 1.0)
    pub distress: f64,
}

impl Default for ZoneRiskValues {
    fn default() -> Self {
        Self {
            safe: 0.0,
            grey: 0.5,
            distress: 1.0,
        }
    }
}

impl ZoneRiskValues {
    /// Value for a zone.
    #[must_use]
    pub const fn value(&self, zone: AltmanZone) -> f64 {
        match zone {
            AltmanZone::Safe => self.safe,
            AltmanZone::Grey => self.grey,
            AltmanZone::Distress => self.distress,
        }
    }
}

/// Tolerance for float error when bucketing the overall score.
pub const LEVEL_TOLERANCE: f64 = 1e-9;

/// Configuration for the risk aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Component weights.
    pub weights: ComponentWeights,
    /// News level mapping.
    pub news_values: NewsRiskValues,
    /// Altman zone mapping.
    pub zone_values: ZoneRiskValues,
    /// Red flag count that maps to a forensic value of 1.0 (default: 5)
    pub max_red_flags: usize,
    /// Annualized volatility that maps to 1.0 (default: 0.80)
    pub volatility_ceiling: f64,
    /// Share of flagged bars that maps to 1.0 (default: 0.10)
    pub flag_rate_ceiling: f64,
    /// Score from which the overall level is MEDIUM (default: 0.4)
    pub medium_from: f64,
    /// Score above which the overall level is HIGH (default: 0.7)
    pub high_above: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            news_values: NewsRiskValues::default(),
            zone_values: ZoneRiskValues::default(),
            max_red_flags: 5,
            volatility_ceiling: 0.80,
            flag_rate_ceiling: 0.10,
            medium_from: 0.4,
            high_above: 0.7,
        }
    }
}

/// The combined risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    /// Weighted score in [0, 1].
    pub score: f64,
    /// Bucketed level.
    pub level: RiskLevel,
    /// Per-component values and weights.
    pub components: Vec<ComponentScore>,
}

impl OverallRisk {
    /// The score of a single component.
    #[must_use]
    pub fn component(&self, component: Component) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.component == component)
    }
}

/// Combines the three component reports into an [`OverallRisk`].
///
/// Normalization:
/// - forensic: 1.0 when manipulation is flagged, else the larger of
///   `min(red flags / max_red_flags, 1)` and the Altman zone value, over the
///   parts that are available
/// - news: the configured value of the report's risk level
/// - pattern: mean of `min(volatility / volatility_ceiling, 1)`,
///   `min((anomalies + spikes) / bars / flag_rate_ceiling, 1)` and the mean
///   per-check risk score over the parts that are available
///
/// A component with no available part is dropped and the remaining weights
/// are rescaled.
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    config: AggregatorConfig,
}

impl RiskAggregator {
    /// Create an aggregator with the given configuration.
    #[must_use]
    pub const fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// The aggregator's configuration.
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Forensic component in [0, 1], `None` when neither model nor any
    /// red-flag check had its inputs.
    #[must_use]
    pub fn forensic_component(&self, report: &ForensicReport) -> Option<f64> {
        if report.is_unavailable() {
            return None;
        }
        if report.manipulation_flag() {
            return Some(1.0);
        }

        let clean_beneish = report.beneish.m_score.map(|_| 0.0);
        let flags = (report.red_flag_checks > 0).then(|| {
            safe_divide(
                report.red_flag_count() as f64,
                self.config.max_red_flags as f64,
                0.0,
            )
            .min(1.0)
        });
        let zone = report.altman.zone.map(|z| self.config.zone_values.value(z));

        clean_beneish.into_iter().chain(flags).chain(zone).reduce(f64::max)
    }

    /// News component in [0, 1].
    #[must_use]
    pub const fn news_component(&self, report: &NewsReport) -> f64 {
        self.config.news_values.value(report.risk_level)
    }

    /// Pattern component in [0, 1], `None` when no check produced a result.
    #[must_use]
    pub fn pattern_component(&self, report: &PatternReport) -> Option<f64> {
        let volatility = report.volatility.map(|v| {
            safe_divide(v.annualized, self.config.volatility_ceiling, 0.0).min(1.0)
        });

        let flag_rate = match (report.anomaly_count(), report.spike_count()) {
            (None, None) => None,
            (anomalies, spikes) => {
                let flagged = anomalies.unwrap_or(0) + spikes.unwrap_or(0);
                let rate = safe_divide(flagged as f64, report.bars_analyzed as f64, 0.0);
                Some(safe_divide(rate, self.config.flag_rate_ceiling, 0.0).min(1.0))
            }
        };

        let parts: Vec<f64> = volatility
            .into_iter()
            .chain(flag_rate)
            .chain(report.risk.score)
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.iter().sum::<f64>() / parts.len() as f64)
    }

    /// Combine already-normalized component values.
    #[must_use]
    pub fn combine(
        &self,
        forensic: Option<f64>,
        news: Option<f64>,
        pattern: Option<f64>,
    ) -> OverallRisk {
        let weights = &self.config.weights;
        let mut components = vec![
            ComponentScore::new(Component::Forensic, forensic, weights.forensic),
            ComponentScore::new(Component::News, news, weights.news),
            ComponentScore::new(Component::Pattern, pattern, weights.pattern),
        ];

        for missing in components.iter().filter(|c| c.value.is_none()) {
            debug!(component = %missing.component, "Component unavailable, reweighting");
        }

        let score = combine_weighted(&mut components).unwrap_or(0.0).clamp(0.0, 1.0);
        let level = RiskLevel::from_thresholds(
            score,
            self.config.medium_from - LEVEL_TOLERANCE,
            self.config.high_above + LEVEL_TOLERANCE,
        );

        OverallRisk {
            score,
            level,
            components,
        }
    }

    /// Aggregate the three reports. A missing pattern report, or a forensic
    /// report without usable statements, drops that component and rescales
    /// the other weights.
    #[must_use]
    pub fn aggregate(
        &self,
        forensic: &ForensicReport,
        news: &NewsReport,
        patterns: Option<&PatternReport>,
    ) -> OverallRisk {
        let overall = self.combine(
            self.forensic_component(forensic),
            Some(self.news_component(news)),
            patterns.and_then(|p| self.pattern_component(p)),
        );

        info!(score = overall.score, level = %overall.level, "Overall risk computed");
        overall
    }
}
