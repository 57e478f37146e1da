//! Environment variable handling and .env file management

use crate::error::{AppError, ErrorContext, Result};
use crate::models::Config;
use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = ".env";

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the current directory if it exists.
    ///
    /// Variables already set in the process environment are left untouched.
    /// Returns the path that was loaded, if any.
    pub fn load_env_file() -> Result<Option<PathBuf>> {
        Self::load_env_file_from(Path::new("."))
    }

    /// Load `.env` from `dir` if it exists.
    ///
    /// Supported variables are validated as they are read, so a bad value in
    /// the file is a config error rather than a usage error from clap.
    pub fn load_env_file_from(dir: &Path) -> Result<Option<PathBuf>> {
        let path = dir.join(ENV_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let entries = dotenv::from_path_iter(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        for entry in entries {
            let (key, value) = entry.with_context(|| format!("Failed to load {}", path.display()))?;
            if std::env::var_os(&key).is_some() {
                continue;
            }

            if Self::is_supported(&key) {
                Self::validate_env_var(&key, &value)
                    .with_context(|| format!("{} in {}", key, path.display()))?;
            }
            std::env::set_var(&key, &value);
        }

        Ok(Some(path))
    }

    fn is_supported(key: &str) -> bool {
        Self::get_supported_env_vars()
            .iter()
            .any(|(var, _, _)| *var == key)
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("SIM_BLOCKS", "Default for --blocks", "1000"),
            ("SIM_PARALLELISM", "Default for --parallelism", "5"),
            ("SIM_USERS", "Default for --users", "500"),
            ("SIM_TX_PER_USER", "Default for --tx-per-user", "20"),
            ("INSIGHT_THRESHOLD_UTXO_LAG", "UTXO lag limit in ms (>= 1)", "250"),
            ("INSIGHT_THRESHOLD_WS_ERRORS", "WebSocket error limit (>= 0)", "10"),
            ("INSIGHT_THRESHOLD_P95_LATENCY", "p95 latency limit in ms (>= 1)", "750"),
            ("LOG_LEVEL", "trace, debug, info, warn, error, fatal or silent", "warn"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Check one variable without touching the process environment
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "SIM_BLOCKS" | "SIM_PARALLELISM" | "SIM_USERS" | "SIM_TX_PER_USER" => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e))),
            "INSIGHT_THRESHOLD_UTXO_LAG"
            | "INSIGHT_THRESHOLD_WS_ERRORS"
            | "INSIGHT_THRESHOLD_P95_LATENCY"
            | "LOG_LEVEL"
            | "ENABLE_COLOR" => {
                let mut config = Config::default();
                config.merge_from_lookup(|k| (k == key).then(|| value.to_string()))?;
                config.validate()
            }
            _ => Err(AppError::config(format!("Unknown environment variable: {}", key))),
        }
    }

    /// Render an example `.env` with every supported variable commented out
    pub fn generate_example_env() -> String {
        let mut content = String::from("# dag-sim configuration\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            content.push_str(&format!("\n# {}\n# {}={}\n", description, var, example));
        }

        content
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<31} {} (e.g. {})\n", var, description, example));
        }

        help.push_str("\nConfiguration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }
}
