//! Configuration sanity checks that warn instead of failing

use crate::{
    error::Result,
    models::Config,
    simulator::MIN_UTXO_LAG_MS,
    types::OutputFormat,
};

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run the hard validation, then collect advisory warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_thresholds(config));
        warnings.extend(Self::validate_output_settings(config));

        Ok(warnings)
    }

    fn validate_thresholds(config: &Config) -> Vec<ValidationWarning> {
        let t = &config.thresholds;
        let mut warnings = Vec::new();

        // UTXO lag never drops under its floor, so a lower threshold trips on every run.
        // p95 has no floor once inputs go negative.
        if t.utxo_lag_ms < MIN_UTXO_LAG_MS as u64 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "INSIGHT_THRESHOLD_UTXO_LAG {}ms is below the {}ms lag floor; every run will exceed it",
                    t.utxo_lag_ms, MIN_UTXO_LAG_MS
                ),
            ));
        }

        if t.websocket_errors == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "INSIGHT_THRESHOLD_WS_ERRORS is 0; any WebSocket error will be reported".to_string(),
            ));
        }

        warnings
    }

    fn validate_output_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.pretty && config.output_format == OutputFormat::Text {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "--pretty has no effect with --format text".to_string(),
            ));
        }

        warnings
    }
}

/// Convenience wrapper around [`ConfigValidator::validate_comprehensive`]
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

/// Severity of a validation warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

/// Advisory finding about the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }
}
