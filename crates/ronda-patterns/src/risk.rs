//! Per-check risk buckets and their combined score.

use ronda_traits::{RiskLevel, stats::mean};
use serde::{Deserialize, Serialize};

use crate::{
    config::PatternConfig,
    divergence::{DivergenceKind, DivergenceReading},
    gap::{GapDirection, GapEvent},
    volatility::VolatilityReading,
};

/// Risk bucket of each pattern check. `None` marks a check that did not run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternRisk {
    /// Volume spike count bucket.
    pub volume_spikes: Option<RiskLevel>,
    /// Price anomaly count bucket.
    pub price_anomalies: Option<RiskLevel>,
    /// Gap-down count bucket.
    pub gaps: Option<RiskLevel>,
    /// MEDIUM on bearish divergence, LOW otherwise.
    pub divergence: Option<RiskLevel>,
    /// Annualized volatility bucket.
    pub volatility: Option<RiskLevel>,
    /// Mean of the per-check scores that are available.
    pub score: Option<f64>,
    /// Bucket of the mean score.
    pub level: Option<RiskLevel>,
}

fn count_risk(count: usize, medium_above: usize, high_above: usize) -> RiskLevel {
    if count > high_above {
        RiskLevel::High
    } else if count > medium_above {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score of a bucket given its (low, medium, high) values.
const fn check_score(level: RiskLevel, values: (f64, f64, f64)) -> f64 {
    match level {
        RiskLevel::Low => values.0,
        RiskLevel::Medium => values.1,
        RiskLevel::High => values.2,
    }
}

const SPIKE_SCORES: (f64, f64, f64) = (0.2, 0.5, 0.8);
const ANOMALY_SCORES: (f64, f64, f64) = (0.2, 0.4, 0.7);
const GAP_SCORES: (f64, f64, f64) = (0.2, 0.4, 0.6);
const DIVERGENCE_SCORES: (f64, f64, f64) = (0.2, 0.5, 0.5);
const VOLATILITY_SCORES: (f64, f64, f64) = (0.2, 0.4, 0.7);

impl PatternRisk {
    /// Bucket every check that ran and average their scores.
    #[must_use]
    pub fn assess(
        spike_count: Option<usize>,
        anomaly_count: Option<usize>,
        gaps: Option<&[GapEvent]>,
        divergence: Option<&DivergenceReading>,
        volatility: Option<&VolatilityReading>,
        config: &PatternConfig,
    ) -> Self {
        let volume_spikes = spike_count
            .map(|n| count_risk(n, config.spike_count_medium, config.spike_count_high));
        let price_anomalies = anomaly_count
            .map(|n| count_risk(n, config.anomaly_count_medium, config.anomaly_count_high));
        let gaps = gaps.map(|gaps| {
            let downs = gaps.iter().filter(|g| g.direction == GapDirection::Down).count();
            count_risk(downs, config.gap_down_medium, config.gap_down_high)
        });
        let divergence = divergence.map(|d| match d.signal {
            Some(DivergenceKind::Bearish) => RiskLevel::Medium,
            _ => RiskLevel::Low,
        });
        let volatility = volatility.map(|v| v.risk);

        let scores: Vec<f64> = [
            volume_spikes.map(|l| check_score(l, SPIKE_SCORES)),
            price_anomalies.map(|l| check_score(l, ANOMALY_SCORES)),
            gaps.map(|l| check_score(l, GAP_SCORES)),
            divergence.map(|l| check_score(l, DIVERGENCE_SCORES)),
            volatility.map(|l| check_score(l, VOLATILITY_SCORES)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let score = mean(&scores);
        let level = score.map(|s| {
            RiskLevel::above_thresholds(s, config.risk_medium_above, config.risk_high_above)
        });

        Self {
            volume_spikes,
            price_anomalies,
            gaps,
            divergence,
            volatility,
            score,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::start;
    use approx::assert_relative_eq;

    fn gap(direction: GapDirection) -> GapEvent {
        GapEvent {
            date: start(),
            gap_pct: if direction == GapDirection::Up { 0.06 } else { -0.06 },
            open: 100.0,
            previous_close: 100.0,
            direction,
        }
    }

    fn divergence(signal: Option<DivergenceKind>) -> DivergenceReading {
        DivergenceReading {
            signal,
            price_slope: 0.0,
            volume_slope: 0.0,
            window: 20,
        }
    }

    #[test]
    fn test_count_buckets_are_strict() {
        assert_eq!(count_risk(5, 5, 10), RiskLevel::Low);
        assert_eq!(count_risk(6, 5, 10), RiskLevel::Medium);
        assert_eq!(count_risk(10, 5, 10), RiskLevel::Medium);
        assert_eq!(count_risk(11, 5, 10), RiskLevel::High);
    }

    #[test]
    fn test_nothing_ran() {
        let risk = PatternRisk::assess(None, None, None, None, None, &PatternConfig::default());
        assert_eq!(risk, PatternRisk::default());
    }

    #[test]
    fn test_quiet_checks_score_low() {
        let risk = PatternRisk::assess(
            Some(0),
            Some(0),
            Some(&[]),
            Some(&divergence(None)),
            None,
            &PatternConfig::default(),
        );
        assert_eq!(risk.gaps, Some(RiskLevel::Low));
        assert_eq!(risk.volatility, None);
        assert_relative_eq!(risk.score.unwrap(), 0.2, epsilon = 1e-12);
        assert_eq!(risk.level, Some(RiskLevel::Low));
    }

    #[test]
    fn test_only_gap_downs_count() {
        let mut gaps = vec![gap(GapDirection::Up); 8];
        gaps.extend([gap(GapDirection::Down); 3]);
        let risk = PatternRisk::assess(None, None, Some(&gaps), None, None, &PatternConfig::default());
        assert_eq!(risk.gaps, Some(RiskLevel::Medium));
        assert_relative_eq!(risk.score.unwrap(), 0.4, epsilon = 1e-12);
        // Not above the 0.4 cut-off
        assert_eq!(risk.level, Some(RiskLevel::Low));
    }

    #[test]
    fn test_busy_series_scores_high() {
        let downs = [gap(GapDirection::Down); 6];
        let risk = PatternRisk::assess(
            Some(11),
            Some(16),
            Some(&downs),
            Some(&divergence(Some(DivergenceKind::Bearish))),
            None,
            &PatternConfig::default(),
        );
        assert_eq!(risk.volume_spikes, Some(RiskLevel::High));
        assert_eq!(risk.price_anomalies, Some(RiskLevel::High));
        assert_eq!(risk.gaps, Some(RiskLevel::High));
        assert_eq!(risk.divergence, Some(RiskLevel::Medium));
        // (0.8 + 0.7 + 0.6 + 0.5) / 4
        assert_relative_eq!(risk.score.unwrap(), 0.65, epsilon = 1e-12);
        assert_eq!(risk.level, Some(RiskLevel::High));
    }

    #[test]
    fn test_bullish_divergence_is_low() {
        let risk = PatternRisk::assess(
            None,
            None,
            None,
            Some(&divergence(Some(DivergenceKind::Bullish))),
            None,
            &PatternConfig::default(),
        );
        assert_eq!(risk.divergence, Some(RiskLevel::Low));
    }
}
