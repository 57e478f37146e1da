//! Configuration data model and validation

use crate::logging::LogLevel;
use crate::types::{AppError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Limits above which the analyzer reports a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// UTXO indexer lag in milliseconds
    #[serde(default = "default_utxo_lag")]
    pub utxo_lag_ms: u64,

    /// WebSocket error count
    #[serde(default = "default_ws_errors")]
    pub websocket_errors: u64,

    /// p95 latency in milliseconds
    #[serde(default = "default_p95_latency")]
    pub p95_latency_ms: u64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            utxo_lag_ms: default_utxo_lag(),
            websocket_errors: default_ws_errors(),
            p95_latency_ms: default_p95_latency(),
        }
    }
}

impl InsightThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.utxo_lag_ms == 0 {
            return Err(AppError::config("INSIGHT_THRESHOLD_UTXO_LAG must be at least 1"));
        }

        if self.p95_latency_ms == 0 {
            return Err(AppError::config("INSIGHT_THRESHOLD_P95_LATENCY must be at least 1"));
        }

        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer thresholds
    #[serde(default)]
    pub thresholds: InsightThresholds,

    /// Minimum level written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// How the record is rendered on stdout
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,

    /// Run the analyzer and emit the results/insights envelope
    #[serde(default)]
    pub include_insights: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: InsightThresholds::default(),
            log_level: default_log_level(),
            enable_color: default_enable_color(),
            output_format: OutputFormat::default(),
            pretty: false,
            include_insights: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }

    /// Merge process environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary variable source into this configuration
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("INSIGHT_THRESHOLD_UTXO_LAG") {
            self.thresholds.utxo_lag_ms = parse_u64("INSIGHT_THRESHOLD_UTXO_LAG", &value)?;
        }

        if let Some(value) = lookup("INSIGHT_THRESHOLD_WS_ERRORS") {
            self.thresholds.websocket_errors = parse_u64("INSIGHT_THRESHOLD_WS_ERRORS", &value)?;
        }

        if let Some(value) = lookup("INSIGHT_THRESHOLD_P95_LATENCY") {
            self.thresholds.p95_latency_ms = parse_u64("INSIGHT_THRESHOLD_P95_LATENCY", &value)?;
        }

        if let Some(value) = lookup("LOG_LEVEL") {
            self.log_level = value
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("Invalid LOG_LEVEL value '{}'", value)))?;
        }

        if let Some(value) = lookup("ENABLE_COLOR") {
            self.enable_color = value
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
        }

        Ok(())
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))
}

// Default value functions for serde
fn default_utxo_lag() -> u64 {
    crate::defaults::DEFAULT_THRESHOLD_UTXO_LAG_MS
}

fn default_ws_errors() -> u64 {
    crate::defaults::DEFAULT_THRESHOLD_WS_ERRORS
}

fn default_p95_latency() -> u64 {
    crate::defaults::DEFAULT_THRESHOLD_P95_LATENCY_MS
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.utxo_lag_ms, 250);
        assert_eq!(config.thresholds.websocket_errors, 10);
        assert_eq!(config.thresholds.p95_latency_ms, 750);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_thresholds() {
        let mut config = Config::default();
        config.thresholds.websocket_errors = 0;
        assert!(config.validate().is_ok());

        config.thresholds.utxo_lag_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.p95_latency_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_from_lookup() {
        let mut config = Config::default();
        config
            .merge_from_lookup(lookup_from(&[
                ("INSIGHT_THRESHOLD_UTXO_LAG", "400"),
                ("INSIGHT_THRESHOLD_WS_ERRORS", " 3 "),
                ("INSIGHT_THRESHOLD_P95_LATENCY", "900"),
                ("LOG_LEVEL", "debug"),
                ("ENABLE_COLOR", "false"),
            ]))
            .unwrap();

        assert_eq!(config.thresholds.utxo_lag_ms, 400);
        assert_eq!(config.thresholds.websocket_errors, 3);
        assert_eq!(config.thresholds.p95_latency_ms, 900);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_merge_from_lookup_missing_keeps_defaults() {
        let mut config = Config::default();
        config.merge_from_lookup(|_| None).unwrap();
        assert_eq!(config.thresholds, InsightThresholds::default());
    }

    #[test]
    fn test_merge_from_lookup_rejects_bad_values() {
        let cases = [
            ("INSIGHT_THRESHOLD_UTXO_LAG", "fast"),
            ("INSIGHT_THRESHOLD_WS_ERRORS", "-1"),
            ("INSIGHT_THRESHOLD_P95_LATENCY", "1.5"),
            ("LOG_LEVEL", "loud"),
            ("ENABLE_COLOR", "maybe"),
        ];

        for (key, value) in cases {
            let mut config = Config::default();
            let err = config.merge_from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert_eq!(err.category(), "CONFIG", "{}={}", key, value);
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn test_silent_log_level() {
        let mut config = Config::default();
        config.merge_from_lookup(lookup_from(&[("LOG_LEVEL", "silent")])).unwrap();
        assert_eq!(config.log_level, LogLevel::Off);
    }
}
