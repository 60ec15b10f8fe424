//! Series builders shared by the unit tests.

use chrono::Duration;
use ronda_traits::{Date, PriceBar, PriceSeries};

pub(crate) fn start() -> Date {
    Date::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Bars with open = high = low = close.
pub(crate) fn series(closes: &[f64], volumes: &[f64]) -> PriceSeries {
    assert_eq!(closes.len(), volumes.len());
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| PriceBar {
            date: start() + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Closes alternating around a level, constant volume.
pub(crate) fn flat_series(len: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..len)
        .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
        .collect();
    series(&closes, &vec![1_000.0; len])
}

/// Bars built from explicit OHLCV tuples.
pub(crate) fn ohlcv(rows: &[(f64, f64, f64, f64, f64)]) -> PriceSeries {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| PriceBar {
            date: start() + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}
