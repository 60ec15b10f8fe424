//! Realized volatility.

use ndarray::Array1;
use ronda_traits::{RiskLevel, stats::simple_returns};
use serde::{Deserialize, Serialize};

use crate::config::PatternConfig;

/// Volatility statistics of daily simple returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReading {
    /// Sample standard deviation of daily returns.
    pub daily: f64,
    /// Daily volatility scaled by the square root of the trading year.
    pub annualized: f64,
    /// Annualized volatility over the most recent window, when it holds at
    /// least two returns.
    pub recent_annualized: Option<f64>,
    /// Largest single-day gain.
    pub max_daily_gain: f64,
    /// Largest single-day loss (negative).
    pub max_daily_loss: f64,
    /// Bucket of the annualized figure.
    pub risk: RiskLevel,
}

fn sample_std(returns: &[f64]) -> Option<f64> {
    (returns.len() >= 2).then(|| Array1::from(returns.to_vec()).std(1.0))
}

/// Compute volatility statistics for a close series.
///
/// Returns `None` with fewer than `config.min_bars` closes (and never with
/// fewer than three, the minimum for a sample deviation of returns).
#[must_use]
pub fn compute_volatility(closes: &[f64], config: &PatternConfig) -> Option<VolatilityReading> {
    if closes.len() < config.min_bars.max(3) {
        return None;
    }

    let returns = simple_returns(closes);
    let annualize = (config.trading_days_per_year as f64).sqrt();

    let daily = sample_std(&returns)?;
    let annualized = daily * annualize;

    let recent_start = returns.len().saturating_sub(config.recent_window);
    let recent_annualized = sample_std(&returns[recent_start..]).map(|s| s * annualize);

    let max_daily_gain = returns.iter().copied().fold(f64::MIN, f64::max);
    let max_daily_loss = returns.iter().copied().fold(f64::MAX, f64::min);

    Some(VolatilityReading {
        daily,
        annualized,
        recent_annualized,
        max_daily_gain,
        max_daily_loss,
        risk: RiskLevel::from_thresholds(annualized, config.volatility_medium, config.volatility_high),
    })
}
