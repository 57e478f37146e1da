//! Core formatting trait and options

use crate::{error::Result, models::SimulationReport};

/// Renders a report for standard output
pub trait OutputFormatter {
    /// Render the full report
    fn format_report(&self, report: &SimulationReport) -> Result<String>;

    /// Short format name for logs
    fn name(&self) -> &'static str;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Pretty-print structured output
    pub pretty: bool,
    /// Analyzer limits used to flag metrics in text reports
    pub thresholds: crate::models::InsightThresholds,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            pretty: false,
            thresholds: crate::models::InsightThresholds::default(),
        }
    }
}
