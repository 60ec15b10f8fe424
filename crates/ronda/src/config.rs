//! Aggregated configuration for a full analysis run.

use std::{fs, path::Path};

use ronda_combine::AggregatorConfig;
use ronda_forensic::ForensicConfig;
use ronda_news::NewsConfig;
use ronda_patterns::PatternConfig;
use ronda_traits::{Result, RondaError};
use serde::{Deserialize, Serialize};

/// Configuration for every analysis stage.
///
/// Every section is optional in JSON; missing sections and fields take their
/// defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Forensic scorer thresholds.
    pub forensic: ForensicConfig,
    /// Pattern detector windows and thresholds.
    pub patterns: PatternConfig,
    /// News keyword lists.
    pub news: NewsConfig,
    /// Component weights and level cut-offs.
    pub aggregator: AggregatorConfig,
}

impl AnalysisConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`] if the JSON is malformed or the values
    /// fail [`AnalysisConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RondaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| RondaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RondaError::Config(e.to_string()))
    }

    /// Check that weights, windows and cut-offs are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let weights = &self.aggregator.weights;
        for (name, weight) in [
            ("forensic", weights.forensic),
            ("news", weights.news),
            ("pattern", weights.pattern),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RondaError::Config(format!(
                    "{name} weight must be a non-negative number, got {weight}"
                )));
            }
        }
        if weights.forensic + weights.news + weights.pattern <= 0.0 {
            return Err(RondaError::Config("component weights sum to zero".to_string()));
        }

        let aggregator = &self.aggregator;
        let forensic = &self.forensic;
        let patterns = &self.patterns;
        if patterns.lookback < 2 {
            return Err(RondaError::Config(format!(
                "lookback must be at least 2, got {}",
                patterns.lookback
            )));
        }

        let cut_offs = [
            ("medium_from", aggregator.medium_from, "high_above", aggregator.high_above),
            (
                "z_distress_below",
                forensic.z_distress_below,
                "z_safe_above",
                forensic.z_safe_above,
            ),
            (
                "elevated_debt_to_equity",
                forensic.elevated_debt_to_equity,
                "max_debt_to_equity",
                forensic.max_debt_to_equity,
            ),
            (
                "min_current_ratio",
                forensic.min_current_ratio,
                "comfortable_current_ratio",
                forensic.comfortable_current_ratio,
            ),
            (
                "risk_medium_above",
                forensic.risk_medium_above,
                "risk_high_above",
                forensic.risk_high_above,
            ),
            (
                "volatility_medium",
                patterns.volatility_medium,
                "volatility_high",
                patterns.volatility_high,
            ),
            (
                "spike_count_medium",
                patterns.spike_count_medium as f64,
                "spike_count_high",
                patterns.spike_count_high as f64,
            ),
            (
                "anomaly_count_medium",
                patterns.anomaly_count_medium as f64,
                "anomaly_count_high",
                patterns.anomaly_count_high as f64,
            ),
            (
                "gap_down_medium",
                patterns.gap_down_medium as f64,
                "gap_down_high",
                patterns.gap_down_high as f64,
            ),
            (
                "risk_medium_above",
                patterns.risk_medium_above,
                "risk_high_above",
                patterns.risk_high_above,
            ),
        ];
        for (low_name, low, high_name, high) in cut_offs {
            if low > high {
                return Err(RondaError::Config(format!(
                    "{low_name} ({low}) exceeds {high_name} ({high})"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_object_is_default() {
        let config = AnalysisConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            AnalysisConfig::from_json(r#"{"aggregator": {"weights": {"news": 0.6}}}"#).unwrap();
        assert_relative_eq!(config.aggregator.weights.news, 0.6);
        assert_relative_eq!(config.aggregator.weights.forensic, 0.5);
        assert_eq!(config.patterns, PatternConfig::default());
    }

    #[test]
    fn test_default_serializes_back() {
        let json = AnalysisConfig::default().to_json_pretty().unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let negative = r#"{"aggregator": {"weights": {"pattern": -0.1}}}"#;
        assert!(matches!(AnalysisConfig::from_json(negative), Err(RondaError::Config(_))));

        let inverted = r#"{"aggregator": {"medium_from": 0.8, "high_above": 0.5}}"#;
        assert!(matches!(AnalysisConfig::from_json(inverted), Err(RondaError::Config(_))));

        let zones = r#"{"forensic": {"z_safe_above": 1.0}}"#;
        assert!(matches!(AnalysisConfig::from_json(zones), Err(RondaError::Config(_))));

        let leverage = r#"{"forensic": {"elevated_debt_to_equity": 3.0}}"#;
        let err = AnalysisConfig::from_json(leverage).unwrap_err();
        assert!(err.to_string().contains("elevated_debt_to_equity (3) exceeds"));

        let gaps = r#"{"patterns": {"gap_down_medium": 9}}"#;
        assert!(matches!(AnalysisConfig::from_json(gaps), Err(RondaError::Config(_))));

        assert!(matches!(AnalysisConfig::from_json("not json"), Err(RondaError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisConfig::load("/nonexistent/ronda.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ronda.json"));
    }
}
