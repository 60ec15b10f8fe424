//! Return anomalies against a rolling window.

use ndarray::ArrayView1;
use ronda_traits::{
    Date, PriceSeries,
    stats::{MIN_STD_THRESHOLD, simple_returns},
};
use serde::{Deserialize, Serialize};

/// Direction of an anomalous move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Return far above the trailing mean.
    Spike,
    /// Return far below the trailing mean.
    Drop,
}

/// A daily return that deviated from its trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomaly {
    /// Bar date.
    pub date: Date,
    /// Closing price on that bar.
    pub close: f64,
    /// Simple return into that bar.
    pub daily_return: f64,
    /// Deviation from the trailing mean in trailing standard deviations.
    pub z_score: f64,
    /// Direction of the move.
    pub direction: MoveDirection,
}

/// Flag returns further than `sigma` sample standard deviations from the
/// mean of the preceding `lookback` returns.
///
/// Statistics are recomputed for every bar from its own trailing window, so
/// a volatility regime change is judged against recent behaviour rather
/// than a single global estimate. Windows with zero variance flag nothing.
///
/// Returns `None` unless at least one return has a full trailing window,
/// which needs `lookback + 2` bars.
#[must_use]
pub fn detect_price_anomalies(
    series: &PriceSeries,
    lookback: usize,
    sigma: f64,
) -> Option<Vec<PriceAnomaly>> {
    if lookback < 2 || series.len() < lookback + 2 {
        return None;
    }

    let returns = simple_returns(&series.closes());
    let history = ArrayView1::from(&returns[..returns.len() - 1]);
    let windows = history.windows(lookback);

    let anomalies = windows
        .into_iter()
        .zip(&returns[lookback..])
        .zip(&series.bars()[lookback + 1..])
        .filter_map(|((window, &ret), bar)| {
            let mean = window.mean()?;
            let std = window.std(1.0);
            if std <= MIN_STD_THRESHOLD {
                return None;
            }
            let z = (ret - mean) / std;
            (z.abs() > sigma).then(|| PriceAnomaly {
                date: bar.date,
                close: bar.close,
                daily_return: ret,
                z_score: z,
                direction: if z > 0.0 {
                    MoveDirection::Spike
                } else {
                    MoveDirection::Drop
                },
            })
        })
        .collect();

    Some(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{flat_series, series};

    fn closes_with_shock(shock: f64) -> Vec<f64> {
        let mut closes: Vec<f64> = (0..25)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let last = *closes.last().unwrap();
        closes.push(last * (1.0 + shock));
        closes
    }

    #[test]
    fn test_oscillation_has_no_anomalies() {
        let anomalies = detect_price_anomalies(&flat_series(40), 20, 2.0).unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_crash_is_flagged_as_drop() {
        let closes = closes_with_shock(-0.15);
        let volumes = vec![1_000.0; closes.len()];
        let anomalies = detect_price_anomalies(&series(&closes, &volumes), 20, 2.0).unwrap();

        assert_eq!(anomalies.len(), 1);
        let anomaly = anomalies[0];
        assert_eq!(anomaly.direction, MoveDirection::Drop);
        assert!(anomaly.z_score < -2.0);
        assert!((anomaly.daily_return + 0.15).abs() < 1e-12);
        assert_eq!(Some(anomaly.date), series(&closes, &volumes).end_date());
    }

    #[test]
    fn test_rally_is_flagged_as_spike() {
        let closes = closes_with_shock(0.12);
        let volumes = vec![1_000.0; closes.len()];
        let anomalies = detect_price_anomalies(&series(&closes, &volumes), 20, 2.0).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].direction, MoveDirection::Spike);
    }

    #[test]
    fn test_constant_prices_flag_nothing() {
        let closes = vec![100.0; 30];
        let anomalies = detect_price_anomalies(&series(&closes, &closes), 20, 2.0).unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_short_series_is_unavailable() {
        assert!(detect_price_anomalies(&flat_series(21), 20, 2.0).is_none());
        assert!(detect_price_anomalies(&flat_series(22), 20, 2.0).is_some());
    }
}
