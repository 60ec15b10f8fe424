//! Ratio and statistics primitives.
//!
//! Every ratio computed anywhere in Ronda routes through [`safe_divide`] (or
//! one of the helpers built on it), so a zero, NaN or infinite denominator
//! yields an explicit fallback value instead of a fault or a silently
//! propagated `NaN`.

use ndarray::ArrayView1;

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Divide `numerator` by `denominator`, returning `default` when the division
/// is not meaningful.
///
/// The fallback applies when the denominator is zero, NaN or infinite, or the
/// numerator is not finite.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::safe_divide;
///
/// assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
/// assert_eq!(safe_divide(10.0, 0.0, 0.0), 0.0);
/// assert_eq!(safe_divide(10.0, f64::NAN, 1.0), 1.0);
/// ```
#[must_use]
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return default;
    }
    numerator / denominator
}

/// Ratio of two optional line items.
///
/// Returns `None` when either side is absent, so that missing data stays
/// distinguishable from a zero value. Present values divide through
/// [`safe_divide`] with a default of `0.0`.
#[must_use]
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    Some(safe_divide(numerator?, denominator?, 0.0))
}

/// Ratio of a current-period value to its prior-period counterpart.
///
/// Falls back to `1.0` ("no change") when the prior value is unusable.
///
/// ```
/// use ronda_traits::stats::period_over_period_ratio;
///
/// assert_eq!(period_over_period_ratio(120.0, 100.0), 1.2);
/// assert_eq!(period_over_period_ratio(120.0, 0.0), 1.0);
/// ```
#[must_use]
pub fn period_over_period_ratio(current: f64, prior: f64) -> f64 {
    safe_divide(current, prior, 1.0)
}

/// Mean and sample standard deviation (N-1 denominator) of `values`.
///
/// Returns `None` for fewer than two values or when any value is not finite.
#[must_use]
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let view = ArrayView1::from(values);
    let mean = view.mean()?;
    let std = view.std(1.0);
    Some((mean, std))
}

/// Arithmetic mean, `None` for empty input.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Simple (percentage) returns of a close series.
///
/// The output has one element fewer than the input. A non-positive or
/// non-finite previous close yields a `0.0` return.
#[must_use]
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| safe_divide(w[1] - w[0], w[0], 0.0))
        .collect()
}

/// Ordinary least-squares slope of `values` against their index.
///
/// Returns `None` for fewer than two points.
#[must_use]
pub fn trend_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values)?;

    let (cov, var) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(cov, var), (i, y)| {
            let dx = i as f64 - x_mean;
            (cov + dx * (y - y_mean), var + dx * dx)
        });

    Some(safe_divide(cov, var, 0.0))
}
