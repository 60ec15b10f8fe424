//! The pattern detector stage.

use ronda_traits::{PriceSeries, Scorer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    anomaly::{PriceAnomaly, detect_price_anomalies},
    config::PatternConfig,
    divergence::{DivergenceReading, detect_divergence},
    gap::{GapDirection, GapEvent, detect_gaps},
    risk::PatternRisk,
    volatility::{VolatilityReading, compute_volatility},
    volume::{VolumeSpike, detect_volume_spikes},
};

/// Pattern analysis outcome.
///
/// Each check is `None` when the series was too short for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    /// Number of bars examined.
    pub bars_analyzed: usize,
    /// Volume spikes in date order.
    pub volume_spikes: Option<Vec<VolumeSpike>>,
    /// Return anomalies in date order.
    pub price_anomalies: Option<Vec<PriceAnomaly>>,
    /// Opening gaps in date order.
    pub gaps: Option<Vec<GapEvent>>,
    /// Divergence over the trailing window.
    pub divergence: Option<DivergenceReading>,
    /// Volatility statistics.
    pub volatility: Option<VolatilityReading>,
    /// Per-check risk buckets and their mean score.
    pub risk: PatternRisk,
}

impl PatternReport {
    /// Number of volume spikes, `None` when the check did not run.
    #[must_use]
    pub fn spike_count(&self) -> Option<usize> {
        self.volume_spikes.as_ref().map(Vec::len)
    }

    /// Number of price anomalies, `None` when the check did not run.
    #[must_use]
    pub fn anomaly_count(&self) -> Option<usize> {
        self.price_anomalies.as_ref().map(Vec::len)
    }

    /// Number of gaps, `None` when the check did not run.
    #[must_use]
    pub fn gap_count(&self) -> Option<usize> {
        self.gaps.as_ref().map(Vec::len)
    }

    fn gaps_in(&self, direction: GapDirection) -> Option<usize> {
        self.gaps
            .as_ref()
            .map(|gaps| gaps.iter().filter(|g| g.direction == direction).count())
    }

    /// Number of gaps up, `None` when the check did not run.
    #[must_use]
    pub fn gap_up_count(&self) -> Option<usize> {
        self.gaps_in(GapDirection::Up)
    }

    /// Number of gaps down, `None` when the check did not run.
    #[must_use]
    pub fn gap_down_count(&self) -> Option<usize> {
        self.gaps_in(GapDirection::Down)
    }
}

/// Detects volume spikes, return anomalies, gaps, divergence and
/// volatility in a price series.
///
/// # Example
///
/// ```
/// use ronda_patterns::PatternDetector;
/// use ronda_traits::{PriceSeries, Scorer};
///
/// let report = PatternDetector::default().score(&PriceSeries::default());
/// assert_eq!(report.bars_analyzed, 0);
/// assert!(report.volatility.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub const fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// The detector's configuration.
    #[must_use]
    pub const fn config(&self) -> &PatternConfig {
        &self.config
    }
}

impl Scorer for PatternDetector {
    type Input<'a> = PriceSeries;
    type Report = PatternReport;

    fn name(&self) -> &str {
        "patterns"
    }

    fn score(&self, series: &PriceSeries) -> PatternReport {
        let config = &self.config;

        let volume_spikes = detect_volume_spikes(series, config.lookback, config.spike_multiplier);
        let price_anomalies = detect_price_anomalies(series, config.lookback, config.anomaly_sigma);
        let gaps = detect_gaps(series, config.gap_threshold);
        let divergence = detect_divergence(series, config.divergence_window);
        let volatility = compute_volatility(&series.closes(), config);

        if volatility.is_none() {
            debug!(
                bars = series.len(),
                min_bars = config.min_bars,
                "Not enough bars for rolling statistics"
            );
        }

        let risk = PatternRisk::assess(
            volume_spikes.as_ref().map(Vec::len),
            price_anomalies.as_ref().map(Vec::len),
            gaps.as_deref(),
            divergence.as_ref(),
            volatility.as_ref(),
            config,
        );

        let report = PatternReport {
            bars_analyzed: series.len(),
            volume_spikes,
            price_anomalies,
            gaps,
            divergence,
            volatility,
            risk,
        };

        info!(
            bars = report.bars_analyzed,
            spikes = ?report.spike_count(),
            anomalies = ?report.anomaly_count(),
            gaps = ?report.gap_count(),
            volatility = ?report.volatility.map(|v| v.annualized),
            risk_score = ?report.risk.score,
            "Pattern analysis complete"
        );

        report
    }
}
