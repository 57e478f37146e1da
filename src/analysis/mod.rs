//! Threshold analysis of simulation records
//!
//! Turns one [`SimulationResults`] record into categorized findings and a list
//! of proposed architecture changes, one proposal per tripped rule.

use crate::defaults::{UX_STALE_P95_LATENCY_MS, UX_STALE_WS_ERRORS};
use crate::models::{InsightThresholds, Insights, SimulationResults};

pub const PROPOSAL_SHARD_INDEXER: &str = "Shard UTXO indexer workers by wallet address range";
pub const PROPOSAL_WS_BACKPRESSURE: &str =
    "Enable batched event fanout and websocket backpressure control";
pub const PROPOSAL_SCALE_API: &str = "Increase API worker pool and add Redis hot-key cache";
pub const PROPOSAL_CONFLICT_AUDIT: &str = "Add deterministic conflict-resolution audit logs per txid";
pub const PROPOSAL_RETRY_POLICY: &str = "Tune retry policy and dead-letter queue alert thresholds";

pub const CONFLICT_RISK: &str =
    "Transaction conflict events detected; verify double-spend handling path";
pub const STALE_UX_FAILURE: &str = "Real-time wallet updates likely feel stale under current load";
pub const CLEAN_SUMMARY: &str =
    "Simulation passed thresholds. Keep current architecture and continue monitoring.";

/// Applies [`InsightThresholds`] to simulation records
#[derive(Debug, Clone, Default)]
pub struct InsightAnalyzer {
    thresholds: InsightThresholds,
}

impl InsightAnalyzer {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Analyze one record
    pub fn analyze(&self, results: &SimulationResults) -> Insights {
        let t = &self.thresholds;
        let mut insights = Insights::default();

        if results.utxo_lag_ms.exceeds(t.utxo_lag_ms) {
            insights.indexer_bottlenecks.push(format!(
                "UTXO indexer lag {}ms exceeded threshold {}ms",
                results.utxo_lag_ms, t.utxo_lag_ms
            ));
            insights.proposed_changes.push(PROPOSAL_SHARD_INDEXER.to_string());
        }

        if results.websocket_errors.exceeds(t.websocket_errors) {
            insights.scaling_risks.push(format!(
                "WebSocket errors {} exceeded threshold {}",
                results.websocket_errors, t.websocket_errors
            ));
            insights.proposed_changes.push(PROPOSAL_WS_BACKPRESSURE.to_string());
        }

        if results.p95_latency_ms.exceeds(t.p95_latency_ms) {
            insights.scaling_risks.push(format!(
                "p95 latency {}ms exceeded threshold {}ms",
                results.p95_latency_ms, t.p95_latency_ms
            ));
            insights.proposed_changes.push(PROPOSAL_SCALE_API.to_string());
        }

        if results.transaction_conflicts.exceeds(0) {
            insights.security_risks.push(CONFLICT_RISK.to_string());
            insights.proposed_changes.push(PROPOSAL_CONFLICT_AUDIT.to_string());
        }

        if results.failed_jobs.exceeds(0) {
            insights.scaling_risks.push(format!(
                "{} background jobs failed during simulation",
                results.failed_jobs
            ));
            insights.proposed_changes.push(PROPOSAL_RETRY_POLICY.to_string());
        }

        // Independent of the configured thresholds
        if results.p95_latency_ms.exceeds(UX_STALE_P95_LATENCY_MS)
            || results.websocket_errors.exceeds(UX_STALE_WS_ERRORS)
        {
            insights.ux_failures.push(STALE_UX_FAILURE.to_string());
        }

        insights.summary = if insights.proposed_changes.is_empty() {
            CLEAN_SUMMARY.to_string()
        } else {
            format!(
                "Detected {} improvement opportunities from current run.",
                insights.proposed_changes.len()
            )
        };

        insights
    }
}
