//! Simulation input parameters

use serde::{Deserialize, Serialize};

const BLOCKS_SEED_WEIGHT: i128 = 31;
const PARALLELISM_SEED_WEIGHT: i128 = 17;
const USERS_SEED_WEIGHT: i128 = 13;

/// The four integers a simulation run is derived from.
///
/// Any i64 is accepted, negatives included; the formulas clamp what needs clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Number of blocks in the run
    pub blocks: i64,
    /// Block parallelism factor
    pub parallelism: i64,
    /// Concurrent simulated users
    pub users: i64,
    /// Transactions issued per user
    pub tx_per_user: i64,
}

impl SimulationParams {
    pub fn new(blocks: i64, parallelism: i64, users: i64, tx_per_user: i64) -> Self {
        Self {
            blocks,
            parallelism,
            users,
            tx_per_user,
        }
    }

    /// Signed seed, a pure function of the inputs so identical runs replay exactly.
    ///
    /// Cannot overflow: the weights sum to 62, so the magnitude stays below 2^69.
    pub fn seed(&self) -> i128 {
        i128::from(self.blocks) * BLOCKS_SEED_WEIGHT
            + i128::from(self.parallelism) * PARALLELISM_SEED_WEIGHT
            + i128::from(self.users) * USERS_SEED_WEIGHT
            + i128::from(self.tx_per_user)
    }

    /// Seed handed to the PRNG.
    ///
    /// Uses the magnitude of [`SimulationParams::seed`], so a seed and its
    /// negation share one stream. Magnitudes above 64 bits fold their high
    /// half into the low half; every smaller seed maps to itself.
    pub fn rng_seed(&self) -> u64 {
        let magnitude = self.seed().unsigned_abs();
        (magnitude as u64) ^ ((magnitude >> 64) as u64)
    }

    /// Total transactions across all users
    pub fn total_transactions(&self) -> i128 {
        i128::from(self.users) * i128::from(self.tx_per_user)
    }
}

impl std::fmt::Display for SimulationParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "blocks={} parallelism={} users={} tx_per_user={}",
            self.blocks, self.parallelism, self.users, self.tx_per_user
        )
    }
}
