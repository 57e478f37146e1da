//! Type definitions and aliases

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Output format for the emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-readable JSON (the record contract)
    #[default]
    Json,
    /// Human-readable report
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Where a run's record came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// Freshly simulated from CLI parameters
    Simulated,
    /// Loaded from a previously emitted record
    File(std::path::PathBuf),
}

impl RecordSource {
    /// Human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            RecordSource::Simulated => "simulation".to_string(),
            RecordSource::File(path) => format!("file {}", path.display()),
        }
    }
}
