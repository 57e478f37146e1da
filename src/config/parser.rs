//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, error::Result, models::Config};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the configuration from defaults, the process environment and CLI flags.
    ///
    /// The `.env` file must already be loaded; `main` does that before clap
    /// runs so the `SIM_*` fallbacks can see it.
    pub fn parse(&self) -> Result<Config> {
        self.parse_with_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigParser::parse`] with an explicit variable source
    pub fn parse_with_lookup<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut Config) {
        if self.cli.no_color {
            config.enable_color = false;
        }

        config.output_format = self.cli.format;
        config.pretty = self.cli.pretty;
        config.include_insights = self.cli.wants_insights();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("UTXO lag threshold: {}ms", config.thresholds.utxo_lag_ms));
    summary.push(format!("WebSocket error threshold: {}", config.thresholds.websocket_errors));
    summary.push(format!("p95 latency threshold: {}ms", config.thresholds.p95_latency_ms));
    summary.push(format!("Log level: {}", config.log_level.as_str()));
    summary.push(format!("Output: {}{}", config.output_format.as_str(), if config.pretty { " (pretty)" } else { "" }));
    summary.push(format!("Insights: {}", config.include_insights));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;
    use clap::Parser;
    use std::collections::HashMap;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "dag-sim",
            "--blocks", "10",
            "--parallelism", "1",
            "--users", "1",
            "--tx-per-user", "1",
        ];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ConfigParser::new(cli(&[])).parse_with_lookup(|_| None).unwrap();
        assert_eq!(config.thresholds.utxo_lag_ms, 250);
        assert!(config.enable_color);
        assert!(!config.include_insights);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_overrides() {
        let parser = ConfigParser::new(cli(&["--no-color", "--insights", "--format", "text", "--verbose"]));
        let config = parser
            .parse_with_lookup(env(&[("ENABLE_COLOR", "true")]))
            .unwrap();

        assert!(!config.enable_color);
        assert!(config.include_insights);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_environment_thresholds() {
        let config = ConfigParser::new(cli(&[]))
            .parse_with_lookup(env(&[
                ("INSIGHT_THRESHOLD_UTXO_LAG", "500"),
                ("INSIGHT_THRESHOLD_WS_ERRORS", "0"),
            ]))
            .unwrap();
        assert_eq!(config.thresholds.utxo_lag_ms, 500);
        assert_eq!(config.thresholds.websocket_errors, 0);
    }

    #[test]
    fn test_invalid_environment_fails() {
        let result = ConfigParser::new(cli(&[]))
            .parse_with_lookup(env(&[("INSIGHT_THRESHOLD_P95_LATENCY", "0")]));
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("INSIGHT_THRESHOLD_P95_LATENCY"));
    }

    #[test]
    fn test_from_file_enables_insights() {
        let cli = Cli::parse_from(["dag-sim", "--from-file", "run.json"]);
        let config = ConfigParser::new(cli).parse_with_lookup(|_| None).unwrap();
        assert!(config.include_insights);
    }

    #[test]
    fn test_display_config_summary() {
        let config = ConfigParser::new(cli(&["--pretty"])).parse_with_lookup(|_| None).unwrap();
        let summary = display_config_summary(&config);
        assert!(summary.contains("UTXO lag threshold: 250ms"));
        assert!(summary.contains("Log level: WARN"));
        assert!(summary.contains("Output: json (pretty)"));
    }
}
