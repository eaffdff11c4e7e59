//! Explicit configuration structs for the signal and metrics engines.
//!
//! Defaults live here as named serde defaults instead of constants buried
//! in strategy code, and the whole set is loadable from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::EvalError;

/// Window lengths for the two-SMA crossover rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CrossoverParams {
    /// Trailing window of the fast average, in periods.
    pub short_window: usize,
    /// Trailing window of the slow average, in periods.
    pub long_window: usize,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 30,
        }
    }
}

impl CrossoverParams {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, EvalError> {
        let params = Self {
            short_window,
            long_window,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if self.short_window == 0 {
            return Err(EvalError::InvalidParams(
                "short_window must be greater than zero".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(EvalError::InvalidParams(format!(
                "short_window ({}) must be smaller than long_window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// Parameters for performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MetricsParams {
    /// Per-period risk-free rate, same periodicity as the returns it is
    /// compared against. Not annualized.
    pub risk_free_rate: f64,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.01,
        }
    }
}

/// Full backtest configuration, loadable from TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BacktestConfig {
    pub signal: CrossoverParams,
    pub metrics: MetricsParams,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

/// Parses a [`BacktestConfig`] from a TOML string.
pub fn load_config_str(s: &str) -> Result<BacktestConfig, ConfigError> {
    Ok(toml::from_str(s)?)
}

/// Reads and parses a [`BacktestConfig`] from a file path.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<BacktestConfig, ConfigError> {
    let s = std::fs::read_to_string(path)?;
    load_config_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BacktestConfig::default();
        assert_eq!(config.signal.short_window, 10);
        assert_eq!(config.signal.long_window, 30);
        assert_eq!(config.metrics.risk_free_rate, 0.01);
    }

    #[test]
    fn validation_rejects_bad_windows() {
        assert!(CrossoverParams::new(0, 5).is_err());
        assert!(CrossoverParams::new(5, 5).is_err());
        assert!(CrossoverParams::new(6, 5).is_err());
        assert!(CrossoverParams::new(2, 5).is_ok());
    }

    #[test]
    fn toml_round_trip_and_partial_files() {
        let config = load_config_str(
            r#"
            [signal]
            short_window = 5
            long_window = 20

            [metrics]
            risk_free_rate = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.signal, CrossoverParams::new(5, 20).unwrap());
        assert_eq!(config.metrics.risk_free_rate, 0.0);

        // Omitted sections fall back to defaults.
        let partial = load_config_str("[signal]\nshort_window = 3\n").unwrap();
        assert_eq!(partial.signal.short_window, 3);
        assert_eq!(partial.signal.long_window, 30);
        assert_eq!(partial.metrics, MetricsParams::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(load_config_str("[signal]\nshort = 3\n").is_err());
    }

    #[test]
    fn loads_from_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backtest.toml");
        std::fs::write(&path, "[metrics]\nrisk_free_rate = 0.002\n").unwrap();
        let config = load_config_path(&path).unwrap();
        assert_eq!(config.metrics.risk_free_rate, 0.002);

        assert!(matches!(
            load_config_path(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
