//! Output formatting for simulation reports
//!
//! The JSON formatter is the machine contract; the text formatter renders the
//! same report for people, coloring metrics that exceed the analyzer limits.

mod formatter;
mod json;
mod text;

pub use formatter::{FormattingOptions, OutputFormatter};
pub use json::JsonFormatter;
pub use text::{MetricStatus, TextFormatter};

use crate::{models::Config, types::OutputFormat};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create the formatter selected by the configuration
    pub fn create_formatter(config: &Config) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color: config.enable_color,
            pretty: config.pretty,
            thresholds: config.thresholds,
        };

        match config.output_format {
            OutputFormat::Json => Box::new(JsonFormatter::new(&options)),
            OutputFormat::Text => Box::new(TextFormatter::new(options)),
        }
    }
}
