//! Synthetic metric derivation
//!
//! Every metric is a fixed formula over the input parameters plus one bounded
//! uniform draw from a PRNG seeded by [`SimulationParams::rng_seed`]. Draws
//! happen in a fixed order, so a given parameter set always yields the same
//! metrics. Integer division floors toward negative infinity.

use crate::models::{results::format_timestamp, SimulationParams, SimulationResults};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Baseline p95 latency before parallelism and load are added
pub const BASE_LATENCY_MS: i64 = 120;
/// p95 latency added per unit of parallelism
pub const LATENCY_PER_PARALLELISM_MS: i64 = 25;
/// Transactions per millisecond of p95 load penalty
pub const LOAD_PENALTY_DIVISOR: i64 = 30;
/// Upper bound of the p95 latency jitter
pub const LATENCY_JITTER_MS: i64 = 120;

/// Floor of the UTXO indexer lag
pub const MIN_UTXO_LAG_MS: i64 = 20;
/// UTXO lag added per unit of parallelism
pub const UTXO_LAG_PER_PARALLELISM_MS: i64 = 40;
/// Upper bound of the UTXO lag jitter
pub const UTXO_LAG_JITTER_MS: i64 = 220;

/// Users per expected WebSocket error
pub const USERS_PER_WS_ERROR: i64 = 80;
/// WebSocket errors absorbed before any are reported
pub const WS_ERROR_ALLOWANCE: i64 = 2;
/// Upper bound of the WebSocket error jitter
pub const WS_ERROR_JITTER: i64 = 10;

/// Parallel blocks tolerated before conflicts appear
pub const CONFLICT_FREE_PARALLELISM: i64 = 2;
/// Upper bound of the conflict jitter
pub const CONFLICT_JITTER: i64 = 3;

/// Transactions per expected failed background job
pub const TX_PER_FAILED_JOB: i64 = 700;
/// Upper bound of the failed job jitter
pub const FAILED_JOB_JITTER: i64 = 2;

/// The five derived metrics of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Not clamped: negative inputs can push it below the base latency
    pub p95_latency_ms: i64,
    pub utxo_lag_ms: i64,
    pub websocket_errors: i64,
    pub transaction_conflicts: i64,
    pub failed_jobs: i64,
}

/// Derive the metrics for `params`, drawing jitter from `rng`.
///
/// Draw order: latency, UTXO lag, WebSocket errors, conflicts, failed jobs.
pub fn derive_metrics<R: Rng>(params: &SimulationParams, rng: &mut R) -> DerivedMetrics {
    // i128 so users * tx_per_user and the pre-clamp arithmetic cannot overflow
    let parallelism = i128::from(params.parallelism);
    let users = i128::from(params.users);
    let total_tx = params.total_transactions();

    let base_latency = i128::from(BASE_LATENCY_MS) + parallelism * i128::from(LATENCY_PER_PARALLELISM_MS);
    let load_penalty = total_tx.div_euclid(i128::from(LOAD_PENALTY_DIVISOR));
    let p95_latency_ms = base_latency + load_penalty + jitter(rng, LATENCY_JITTER_MS);

    let utxo_lag_ms = (parallelism * i128::from(UTXO_LAG_PER_PARALLELISM_MS)
        + jitter(rng, UTXO_LAG_JITTER_MS))
    .max(i128::from(MIN_UTXO_LAG_MS));

    let websocket_errors = (users.div_euclid(i128::from(USERS_PER_WS_ERROR)) - i128::from(WS_ERROR_ALLOWANCE)
        + jitter(rng, WS_ERROR_JITTER))
    .max(0);

    let transaction_conflicts = (parallelism - i128::from(CONFLICT_FREE_PARALLELISM)
        + jitter(rng, CONFLICT_JITTER))
    .max(0);

    let failed_jobs =
        (total_tx.div_euclid(i128::from(TX_PER_FAILED_JOB)) + jitter(rng, FAILED_JOB_JITTER)).max(0);

    DerivedMetrics {
        p95_latency_ms: saturate(p95_latency_ms),
        utxo_lag_ms: saturate(utxo_lag_ms),
        websocket_errors: saturate(websocket_errors),
        transaction_conflicts: saturate(transaction_conflicts),
        failed_jobs: saturate(failed_jobs),
    }
}

/// Uniform draw from `0..=upper`
fn jitter<R: Rng>(rng: &mut R, upper: i64) -> i128 {
    i128::from(rng.random_range(0..=upper))
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Seeded simulator for one parameter set
#[derive(Debug, Clone)]
pub struct Simulator {
    params: SimulationParams,
}

impl Simulator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Fresh PRNG seeded from the parameters
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.params.rng_seed())
    }

    /// Derive the metrics without attaching a timestamp
    pub fn metrics(&self) -> DerivedMetrics {
        derive_metrics(&self.params, &mut self.rng())
    }

    /// Produce a record stamped with the current UTC time
    pub fn run(&self) -> SimulationResults {
        self.run_at(Utc::now())
    }

    /// Produce a record stamped with `timestamp`
    pub fn run_at(&self, timestamp: DateTime<Utc>) -> SimulationResults {
        let metrics = self.metrics();

        SimulationResults {
            block_count: self.params.blocks.into(),
            parallelism: self.params.parallelism.into(),
            users: self.params.users.into(),
            tx_per_user: self.params.tx_per_user.into(),
            p95_latency_ms: metrics.p95_latency_ms.into(),
            utxo_lag_ms: metrics.utxo_lag_ms.into(),
            websocket_errors: metrics.websocket_errors.into(),
            transaction_conflicts: metrics.transaction_conflicts.into(),
            failed_jobs: metrics.failed_jobs.into(),
            timestamp: format_timestamp(&timestamp),
        }
    }
}
