//! Opening gaps.

use ronda_traits::{Date, PriceSeries, stats::safe_divide};
use serde::{Deserialize, Serialize};

/// Direction of an opening gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapDirection {
    /// Opened above the previous close.
    Up,
    /// Opened below the previous close.
    Down,
}

/// An open that moved away from the previous close by more than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapEvent {
    /// Date of the gapping bar.
    pub date: Date,
    /// Signed gap as a fraction of the previous close.
    pub gap_pct: f64,
    /// Opening price.
    pub open: f64,
    /// Previous bar's close.
    pub previous_close: f64,
    /// Gap direction.
    pub direction: GapDirection,
}

/// Flag bars where `|open - previous close| / previous close > threshold`.
///
/// A previous close of zero cannot produce a gap. Returns `None` for fewer
/// than two bars.
#[must_use]
pub fn detect_gaps(series: &PriceSeries, threshold: f64) -> Option<Vec<GapEvent>> {
    if series.len() < 2 {
        return None;
    }

    let gaps = series
        .bars()
        .windows(2)
        .filter_map(|pair| {
            let (previous, bar) = (&pair[0], &pair[1]);
            let gap = safe_divide(bar.open - previous.close, previous.close, 0.0);
            (gap.abs() > threshold).then(|| GapEvent {
                date: bar.date,
                gap_pct: gap,
                open: bar.open,
                previous_close: previous.close,
                direction: if gap > 0.0 {
                    GapDirection::Up
                } else {
                    GapDirection::Down
                },
            })
        })
        .collect();

    Some(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ohlcv;
    use approx::assert_relative_eq;

    #[test]
    fn test_gap_up_and_down() {
        let series = ohlcv(&[
            (100.0, 101.0, 99.0, 100.0, 1000.0),
            (108.0, 110.0, 107.0, 109.0, 1000.0),
            (108.0, 109.0, 104.0, 105.0, 1000.0),
            (99.0, 100.0, 98.0, 99.0, 1000.0),
        ]);
        let gaps = detect_gaps(&series, 0.05).unwrap();

        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].direction, GapDirection::Up);
        assert_relative_eq!(gaps[0].gap_pct, 0.08, epsilon = 1e-12);
        assert_relative_eq!(gaps[0].previous_close, 100.0);
        assert_eq!(gaps[1].direction, GapDirection::Down);
        assert_relative_eq!(gaps[1].gap_pct, -6.0 / 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_small_moves_are_ignored() {
        let series = ohlcv(&[
            (100.0, 101.0, 99.0, 100.0, 1000.0),
            (104.0, 105.0, 103.0, 104.0, 1000.0),
        ]);
        assert!(detect_gaps(&series, 0.05).unwrap().is_empty());
    }

    #[test]
    fn test_zero_previous_close() {
        let series = ohlcv(&[(0.0, 0.0, 0.0, 0.0, 0.0), (10.0, 10.0, 10.0, 10.0, 100.0)]);
        assert!(detect_gaps(&series, 0.05).unwrap().is_empty());
    }

    #[test]
    fn test_single_bar_is_unavailable() {
        let series = ohlcv(&[(100.0, 101.0, 99.0, 100.0, 1000.0)]);
        assert!(detect_gaps(&series, 0.05).is_none());
    }
}
