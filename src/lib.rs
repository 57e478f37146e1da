//! DAG Simulator
//!
//! Produces synthetic, deterministically seeded performance metrics (latency,
//! indexer lag, error counts) for a DAG ledger test harness and emits them as a
//! single JSON record. An optional threshold analyzer turns a record into
//! scaling, security and UX findings.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod simulator;
pub mod types;

// Re-export commonly used types
pub use analysis::InsightAnalyzer;
pub use error::{AppError, Result};
pub use models::{Config, InsightThresholds, Insights, SimulationParams, SimulationResults};
pub use simulator::Simulator;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_THRESHOLD_UTXO_LAG_MS: u64 = 250;
    pub const DEFAULT_THRESHOLD_WS_ERRORS: u64 = 10;
    pub const DEFAULT_THRESHOLD_P95_LATENCY_MS: u64 = 750;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// p95 latency above which real-time UX is considered degraded
    pub const UX_STALE_P95_LATENCY_MS: u64 = 1200;
    /// WebSocket error count above which real-time UX is considered degraded
    pub const UX_STALE_WS_ERRORS: u64 = 50;
}
