//! Numeric record values

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A numeric field of a simulation record.
///
/// Simulated records always hold integers. Records loaded from a file may
/// carry any JSON number, and the value is echoed back exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordNumber(Number);

impl RecordNumber {
    /// The value as an integer, if it is one that fits in i64
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    pub fn is_integer(&self) -> bool {
        !self.0.is_f64()
    }

    /// Strictly greater than `limit`. Integers compare exactly.
    pub fn exceeds(&self, limit: u64) -> bool {
        if let Some(value) = self.0.as_i64() {
            i128::from(value) > i128::from(limit)
        } else if let Some(value) = self.0.as_u64() {
            value > limit
        } else {
            self.0.as_f64().is_some_and(|value| value > limit as f64)
        }
    }
}

impl From<i64> for RecordNumber {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

impl fmt::Display for RecordNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
