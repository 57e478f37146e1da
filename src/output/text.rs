//! Human-readable report with optional terminal colors

use super::formatter::{FormattingOptions, OutputFormatter};
use crate::{
    error::{AppError, Result},
    models::{InsightThresholds, Insights, RecordNumber, SimulationReport, SimulationResults},
};
use colored::{Color, ColoredString, Colorize};
use std::fmt::Write as _;

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 10;

/// Whether a metric stayed within its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Ok,
    Over,
}

impl MetricStatus {
    pub fn of(value: &RecordNumber, limit: u64) -> Self {
        if value.exceeds(limit) {
            Self::Over
        } else {
            Self::Ok
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Ok => Color::Green,
            Self::Over => Color::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Over => "OVER",
        }
    }
}

/// Plain or colored text report
pub struct TextFormatter {
    options: FormattingOptions,
}

impl TextFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn format_header(&self, out: &mut String, title: &str) -> std::fmt::Result {
        let border = "=".repeat(title.len());
        writeln!(out, "{}", self.bold(title))?;
        writeln!(out, "{}", self.colorize(&border, Color::Blue))
    }

    fn format_row(&self, out: &mut String, label: &str, value: &str) -> std::fmt::Result {
        writeln!(out, "  {:<width$}{}", label, value, width = LABEL_WIDTH)
    }

    fn format_metric(
        &self,
        out: &mut String,
        label: &str,
        value: String,
        status: MetricStatus,
        limit: String,
    ) -> std::fmt::Result {
        // Pad before coloring so escape codes do not skew alignment
        let padded = format!("{:<width$}", value, width = VALUE_WIDTH);
        writeln!(
            out,
            "  {:<lwidth$}{} {} {}",
            label,
            self.colorize(&padded, status.color()),
            self.colorize(status.label(), status.color()),
            limit,
            lwidth = LABEL_WIDTH
        )
    }

    fn format_results(&self, out: &mut String, results: &SimulationResults) -> std::fmt::Result {
        let t: &InsightThresholds = &self.options.thresholds;
        let seed = results
            .params()
            .map_or_else(|| "n/a".to_string(), |params| params.seed().to_string());

        writeln!(out, "{}", self.bold("Parameters"))?;
        self.format_row(out, "Blocks", &results.block_count.to_string())?;
        self.format_row(out, "Parallelism", &results.parallelism.to_string())?;
        self.format_row(out, "Users", &results.users.to_string())?;
        self.format_row(out, "Tx per user", &results.tx_per_user.to_string())?;
        self.format_row(out, "Seed", &seed)?;
        writeln!(out)?;

        writeln!(out, "{}", self.bold("Metrics"))?;
        self.format_metric(
            out,
            "p95 latency",
            format!("{} ms", results.p95_latency_ms),
            MetricStatus::of(&results.p95_latency_ms, t.p95_latency_ms),
            format!("(limit {} ms)", t.p95_latency_ms),
        )?;
        self.format_metric(
            out,
            "UTXO lag",
            format!("{} ms", results.utxo_lag_ms),
            MetricStatus::of(&results.utxo_lag_ms, t.utxo_lag_ms),
            format!("(limit {} ms)", t.utxo_lag_ms),
        )?;
        self.format_metric(
            out,
            "WebSocket errors",
            results.websocket_errors.to_string(),
            MetricStatus::of(&results.websocket_errors, t.websocket_errors),
            format!("(limit {})", t.websocket_errors),
        )?;
        self.format_metric(
            out,
            "Tx conflicts",
            results.transaction_conflicts.to_string(),
            MetricStatus::of(&results.transaction_conflicts, 0),
            "(limit 0)".to_string(),
        )?;
        self.format_metric(
            out,
            "Failed jobs",
            results.failed_jobs.to_string(),
            MetricStatus::of(&results.failed_jobs, 0),
            "(limit 0)".to_string(),
        )?;
        writeln!(out)?;

        self.format_row(out, "Timestamp", &results.timestamp)
    }

    fn format_insights(&self, out: &mut String, insights: &Insights) -> std::fmt::Result {
        writeln!(out)?;
        writeln!(out, "{}", self.bold("Insights"))?;

        for (label, items) in insights.categories() {
            writeln!(out, "  {}:", label)?;
            for item in items {
                writeln!(out, "    - {}", item)?;
            }
        }

        let summary_color = if insights.is_clean() { Color::Green } else { Color::Yellow };
        writeln!(out, "  Summary: {}", self.colorize(&insights.summary, summary_color))
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &SimulationReport) -> Result<String> {
        let mut out = String::new();

        self.format_header(&mut out, "DAG Simulation Results")
            .and_then(|_| self.format_results(&mut out, &report.results))
            .map_err(|e| AppError::internal(format!("Failed to format report: {}", e)))?;

        if let Some(insights) = &report.insights {
            self.format_insights(&mut out, insights)
                .map_err(|e| AppError::internal(format!("Failed to format insights: {}", e)))?;
        }

        Ok(out.trim_end().to_string())
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
