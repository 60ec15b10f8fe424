//! Price-volume divergence.
//!
//! A trend that makes new extremes on falling participation is suspect.
//! The check compares the two halves of a trailing window for a new high
//! (or low), then confirms the move with least-squares trend slopes of
//! close and volume over the whole window.

use ronda_traits::{
    PriceBar, PriceSeries,
    stats::{mean, safe_divide, trend_slope},
};
use serde::{Deserialize, Serialize};

/// Kind of divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceKind {
    /// Higher high on a rising price trend with declining volume.
    Bearish,
    /// Lower low on a falling price trend with rising volume.
    Bullish,
}

/// Divergence check over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceReading {
    /// Detected divergence, if any.
    pub signal: Option<DivergenceKind>,
    /// Close trend slope per bar, relative to the mean close.
    pub price_slope: f64,
    /// Volume trend slope per bar, relative to the mean volume.
    pub volume_slope: f64,
    /// Number of bars examined.
    pub window: usize,
}

fn highest(bars: &[PriceBar]) -> f64 {
    bars.iter().map(|b| b.high).fold(f64::MIN, f64::max)
}

fn lowest(bars: &[PriceBar]) -> f64 {
    bars.iter().map(|b| b.low).fold(f64::MAX, f64::min)
}

fn relative_slope(values: &[f64]) -> Option<f64> {
    Some(safe_divide(trend_slope(values)?, mean(values)?, 0.0))
}

/// Check the last `window` bars for price-volume divergence.
///
/// Returns `None` when the series is shorter than the window or the window
/// is too small to split into two halves of at least two bars.
#[must_use]
pub fn detect_divergence(series: &PriceSeries, window: usize) -> Option<DivergenceReading> {
    if window < 4 || series.len() < window {
        return None;
    }

    let bars = &series.bars()[series.len() - window..];
    let (first, second) = bars.split_at(window / 2);

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let price_slope = relative_slope(&closes)?;
    let volume_slope = relative_slope(&volumes)?;

    let signal = if highest(second) > highest(first) && price_slope > 0.0 && volume_slope < 0.0 {
        Some(DivergenceKind::Bearish)
    } else if lowest(second) < lowest(first) && price_slope < 0.0 && volume_slope > 0.0 {
        Some(DivergenceKind::Bullish)
    } else {
        None
    };

    Some(DivergenceReading {
        signal,
        price_slope,
        volume_slope,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{flat_series, series};

    fn trending(price_step: f64, volume_step: f64) -> PriceSeries {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + price_step * i as f64).collect();
        let volumes: Vec<f64> = (0..30).map(|i| 10_000.0 + volume_step * i as f64).collect();
        series(&closes, &volumes)
    }

    #[test]
    fn test_rally_on_fading_volume_is_bearish() {
        let reading = detect_divergence(&trending(1.0, -200.0), 20).unwrap();
        assert_eq!(reading.signal, Some(DivergenceKind::Bearish));
        assert!(reading.price_slope > 0.0);
        assert!(reading.volume_slope < 0.0);
        assert_eq!(reading.window, 20);
    }

    #[test]
    fn test_selloff_on_rising_volume_is_bullish() {
        let reading = detect_divergence(&trending(-1.0, 200.0), 20).unwrap();
        assert_eq!(reading.signal, Some(DivergenceKind::Bullish));
    }

    #[test]
    fn test_confirmed_trend_has_no_divergence() {
        let reading = detect_divergence(&trending(1.0, 200.0), 20).unwrap();
        assert!(reading.signal.is_none());
        let reading = detect_divergence(&flat_series(25), 20).unwrap();
        assert!(reading.signal.is_none());
    }

    #[test]
    fn test_short_series_is_unavailable() {
        assert!(detect_divergence(&flat_series(19), 20).is_none());
        assert!(detect_divergence(&flat_series(10), 3).is_none());
    }
}
