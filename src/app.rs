//! Main application orchestration and execution

use crate::{
    analysis::InsightAnalyzer,
    cli::Cli,
    config::{display_config_summary, load_config, validate_config, EnvManager, ValidationLevel},
    error::{AppError, ErrorContext, Result},
    logging::{Logger, LoggerFactory},
    models::{Config, SimulationReport, SimulationResults},
    output::OutputFormatterFactory,
    simulator::Simulator,
    types::RecordSource,
};
use std::path::Path;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run one simulation or analysis and return the rendered output.
    ///
    /// Diagnostics go to stderr through the logger; the returned string is
    /// what `main` prints on stdout.
    pub fn run(self) -> Result<String> {
        if self.cli.env_example {
            return Ok(EnvManager::generate_example_env());
        }

        let config = load_config(self.cli.clone())?;
        let factory = LoggerFactory::new(config.clone());
        let logger = factory.create_logger("dag_sim::app");

        logger
            .debug("Configuration loaded")
            .field("version", crate::VERSION)
            .field("build_time", crate::BUILD_TIME)
            .field("git_commit", crate::GIT_COMMIT)
            .field("target", crate::TARGET_TRIPLE)
            .field("summary", display_config_summary(&config))
            .log();

        for warning in validate_config(&config)? {
            match warning.level {
                ValidationLevel::Warning => crate::log_warn!(logger, "{}", warning.message),
                ValidationLevel::Info => crate::log_info!(logger, "{}", warning.message),
            }
        }

        let source = match &self.cli.from_file {
            Some(path) => RecordSource::File(path.clone()),
            None => RecordSource::Simulated,
        };

        if self.cli.is_file_mode() && self.cli.sim_flags_on_command_line {
            crate::log_warn!(
                logger,
                "--blocks, --parallelism, --users and --tx-per-user are ignored with --from-file"
            );
        }

        let results = self.obtain_record(&source, &logger)?;
        let report = build_report(results, &config);

        if let Some(insights) = &report.insights {
            logger
                .info("Analysis complete")
                .field("findings", insights.finding_count())
                .field("proposals", insights.proposed_changes.len())
                .log();
        }

        let formatter = OutputFormatterFactory::create_formatter(&config);
        crate::log_debug!(logger, "Formatting report as {}", formatter.name());

        formatter.format_report(&report).map_err(|e| {
            logger.error("Formatting failed").error_info(&e).log();
            e
        })
    }

    fn obtain_record(&self, source: &RecordSource, logger: &Logger) -> Result<SimulationResults> {
        let results = match source {
            RecordSource::File(path) => read_record(path)?,
            RecordSource::Simulated => {
                let params = self.cli.params().ok_or_else(|| {
                    AppError::validation(
                        "--blocks, --parallelism, --users and --tx-per-user are required without --from-file",
                    )
                })?;

                logger.info("Starting simulation").params(&params).log();
                logger
                    .trace("Seeded generator")
                    .field("signed_seed", params.seed().to_string())
                    .field("rng_seed", params.rng_seed())
                    .log();
                Simulator::new(params).run()
            }
        };

        logger
            .info("Record ready")
            .field("source", source.describe())
            .metrics(&results)
            .log();

        Ok(results)
    }
}

/// Wrap a record in a report, running the analyzer when insights are enabled
pub fn build_report(results: SimulationResults, config: &Config) -> SimulationReport {
    let report = SimulationReport::new(results);

    if config.include_insights {
        let insights = InsightAnalyzer::new(config.thresholds).analyze(&report.results);
        report.with_insights(insights)
    } else {
        report
    }
}

/// Load a record previously emitted on stdout
pub fn read_record(path: &Path) -> Result<SimulationResults> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SimulationResults::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimulationParams;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record() -> SimulationResults {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        Simulator::new(SimulationParams::new(1000, 5, 500, 20)).run_at(ts)
    }

    #[test]
    fn test_build_report_without_insights() {
        let report = build_report(record(), &Config::default());
        assert!(report.insights.is_none());
    }

    #[test]
    fn test_build_report_with_insights() {
        let config = Config {
            include_insights: true,
            ..Config::default()
        };
        let report = build_report(record(), &config);
        let insights = report.insights.unwrap();
        // 5 parallelism always yields at least one conflict
        assert!(!insights.security_risks.is_empty());
        assert!(!insights.is_clean());
    }

    #[test]
    fn test_read_record_roundtrip() {
        let original = record();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&original).unwrap()).unwrap();

        assert_eq!(read_record(file.path()).unwrap(), original);
    }

    #[test]
    fn test_read_record_missing_file() {
        let err = read_record(Path::new("/nonexistent/dag-sim/record.json")).unwrap_err();
        assert_eq!(err.category(), "IO");
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("/nonexistent/dag-sim/record.json"));
    }

    #[test]
    fn test_read_record_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_record(file.path()).unwrap_err();
        assert_eq!(err.category(), "PARSE");
        assert!(err.to_string().contains("Unable to parse simulation JSON output"));
    }

    #[test]
    fn test_app_env_example() {
        let cli = Cli::parse_from(["dag-sim", "--env-example"]);
        let output = App::new(cli).run().unwrap();
        assert_eq!(output, EnvManager::generate_example_env());
        assert!(output.contains("# SIM_BLOCKS=1000"));
    }

    #[test]
    fn test_app_run_negative_inputs() {
        let cli = Cli::parse_from([
            "dag-sim", "--blocks", "-1000", "--parallelism", "-5", "--users", "-500", "--tx-per-user", "-20",
        ]);
        let output = App::new(cli).run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["blockCount"], -1000);
        assert_eq!(value["p95LatencyMs"], 432);
        assert_eq!(value["failedJobs"], 14);
    }

    #[test]
    fn test_app_from_file_ignores_simulation_flags() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&record()).unwrap()).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut cli = Cli::parse_from(["dag-sim", "--from-file", path.as_str(), "--blocks", "7"]);
        cli.sim_flags_on_command_line = true;
        let output = App::new(cli).run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"]["blockCount"], 1000);
    }

    #[test]
    fn test_app_run_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&record()).unwrap()).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from(["dag-sim", "--from-file", path.as_str()]);
        let output = App::new(cli).run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"]["blockCount"], 1000);
        assert!(value["insights"]["summary"].is_string());
    }
}
