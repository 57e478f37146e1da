//! JSON record output

use super::formatter::{FormattingOptions, OutputFormatter};
use crate::{error::Result, models::SimulationReport};

/// Emits the bare record, or the `{"results", "insights"}` envelope when the
/// report carries insights
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(options: &FormattingOptions) -> Self {
        Self {
            pretty: options.pretty,
        }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SimulationReport) -> Result<String> {
        match report.insights {
            Some(_) => self.to_json(report),
            None => self.to_json(&report.results),
        }
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
