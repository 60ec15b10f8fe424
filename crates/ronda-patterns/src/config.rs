//! Pattern detector configuration.

use serde::{Deserialize, Serialize};

/// Window sizes and thresholds for the pattern detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Trailing window for volume and return statistics (default: 20 bars)
    pub lookback: usize,

    /// Volume above this multiple of the trailing mean is a spike (default: 2.0)
    pub spike_multiplier: f64,

    /// Returns further than this many standard deviations from the trailing
    /// mean are anomalies (default: 2.0)
    pub anomaly_sigma: f64,

    /// Open-to-previous-close move treated as a gap (default: 0.05)
    pub gap_threshold: f64,

    /// Trailing window for price-volume divergence (default: 20 bars)
    pub divergence_window: usize,

    /// Minimum bars for volatility statistics (default: 20)
    pub min_bars: usize,

    /// Trading days per year for annualization (default: 252)
    pub trading_days_per_year: usize,

    /// Annualized volatility at which risk becomes MEDIUM (default: 0.20)
    pub volatility_medium: f64,

    /// Annualized volatility above which risk is HIGH (default: 0.40)
    pub volatility_high: f64,

    /// Window for the recent volatility reading (default: 30 bars)
    pub recent_window: usize,

    /// Spike count above which spike risk is MEDIUM (default: 5)
    pub spike_count_medium: usize,

    /// Spike count above which spike risk is HIGH (default: 10)
    pub spike_count_high: usize,

    /// Anomaly count above which anomaly risk is MEDIUM (default: 8)
    pub anomaly_count_medium: usize,

    /// Anomaly count above which anomaly risk is HIGH (default: 15)
    pub anomaly_count_high: usize,

    /// Gap-down count above which gap risk is MEDIUM (default: 2)
    pub gap_down_medium: usize,

    /// Gap-down count above which gap risk is HIGH (default: 5)
    pub gap_down_high: usize,

    /// Mean check score above which pattern risk is MEDIUM (default: 0.4)
    pub risk_medium_above: f64,

    /// Mean check score above which pattern risk is HIGH (default: 0.6)
    pub risk_high_above: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            spike_multiplier: 2.0,
            anomaly_sigma: 2.0,
            gap_threshold: 0.05,
            divergence_window: 20,
            min_bars: 20,
            trading_days_per_year: 252,
            volatility_medium: 0.20,
            volatility_high: 0.40,
            recent_window: 30,
            spike_count_medium: 5,
            spike_count_high: 10,
            anomaly_count_medium: 8,
            anomaly_count_high: 15,
            gap_down_medium: 2,
            gap_down_high: 5,
            risk_medium_above: 0.4,
            risk_high_above: 0.6,
        }
    }
}
