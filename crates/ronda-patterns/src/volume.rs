//! Volume spike detection.

use ndarray::ArrayView1;
use ronda_traits::{Date, PriceSeries, stats::safe_divide};
use serde::{Deserialize, Serialize};

/// A bar whose volume exceeded a multiple of its trailing average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpike {
    /// Bar date.
    pub date: Date,
    /// Traded volume.
    pub volume: f64,
    /// Volume divided by the trailing mean.
    pub ratio: f64,
}

/// Flag bars whose volume exceeds `multiplier` times the mean of the
/// previous `lookback` bars. The current bar is excluded from its own mean.
///
/// Returns `None` when the series has no bar with a full trailing window.
#[must_use]
pub fn detect_volume_spikes(
    series: &PriceSeries,
    lookback: usize,
    multiplier: f64,
) -> Option<Vec<VolumeSpike>> {
    if lookback == 0 || series.len() <= lookback {
        return None;
    }

    let volumes = series.volumes();
    let trailing_means = ArrayView1::from(&volumes[..volumes.len() - 1])
        .windows(lookback)
        .into_iter()
        .filter_map(|w| w.mean())
        .collect::<Vec<_>>();

    let spikes = series.bars()[lookback..]
        .iter()
        .zip(trailing_means)
        .filter(|(bar, mean)| *mean > 0.0 && bar.volume > multiplier * mean)
        .map(|(bar, mean)| VolumeSpike {
            date: bar.date,
            volume: bar.volume,
            ratio: safe_divide(bar.volume, mean, 0.0),
        })
        .collect();

    Some(spikes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{series, start};
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn with_last_volume(last: f64) -> PriceSeries {
        let mut volumes = vec![100.0; 20];
        volumes.push(last);
        series(&[50.0; 21], &volumes)
    }

    #[test]
    fn test_spike_on_last_bar() {
        let spikes = detect_volume_spikes(&with_last_volume(250.0), 20, 2.0).unwrap();
        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].date, start() + Duration::days(20));
        assert_relative_eq!(spikes[0].volume, 250.0);
        assert_relative_eq!(spikes[0].ratio, 2.5);
    }

    #[test]
    fn test_below_multiplier_is_not_flagged() {
        let spikes = detect_volume_spikes(&with_last_volume(199.0), 20, 2.0).unwrap();
        assert!(spikes.is_empty());
        // Strictly greater than the multiple
        let spikes = detect_volume_spikes(&with_last_volume(200.0), 20, 2.0).unwrap();
        assert!(spikes.is_empty());
    }

    #[test]
    fn test_current_bar_excluded_from_mean() {
        // Two consecutive spikes: the second is measured against a mean that
        // includes the first
        let mut volumes = vec![100.0; 20];
        volumes.extend([1000.0, 1000.0]);
        let spikes = detect_volume_spikes(&series(&[50.0; 22], &volumes), 20, 2.0).unwrap();
        assert_eq!(spikes.len(), 2);
        assert_relative_eq!(spikes[0].ratio, 10.0);
        // mean of 19 x 100 and 1 x 1000 = 145
        assert_relative_eq!(spikes[1].ratio, 1000.0 / 145.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volume_history() {
        let mut volumes = vec![0.0; 20];
        volumes.push(500.0);
        let spikes = detect_volume_spikes(&series(&[50.0; 21], &volumes), 20, 2.0).unwrap();
        assert!(spikes.is_empty());
    }

    #[test]
    fn test_short_series_is_unavailable() {
        let short = series(&[50.0; 20], &[100.0; 20]);
        assert!(detect_volume_spikes(&short, 20, 2.0).is_none());
    }
}
