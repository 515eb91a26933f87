//! Timestamp type used for proposal and boost windows.
//!
//! Timestamps are Unix epoch seconds (UTC), matching what the governance
//! subgraphs and the boost indexer report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AgoraError;

/// Canonical boost campaign length: exactly fourteen days, in seconds.
pub const TWO_WEEKS: u64 = 14 * 24 * 60 * 60;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds from `self` to `later`, or `None` if `later` precedes `self`.
    pub fn seconds_until(&self, later: Timestamp) -> Option<u64> {
        later.0.checked_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Upper bound (exclusive) of seconds representable as `u64`, as `f64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Indexers report boost windows as numeric strings, sometimes in decimal or
/// exponent form (`"1000.0"`, `"1e3"`). Any number that is a whole,
/// non-negative count of seconds is accepted; everything else is rejected.
impl FromStr for Timestamp {
    type Err = AgoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(secs) = trimmed.parse::<u64>() {
            return Ok(Self(secs));
        }

        let invalid = || AgoraError::InvalidTimestamp(s.to_string());
        let value: f64 = trimmed.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value >= U64_LIMIT {
            return Err(invalid());
        }
        Ok(Self(value as u64))
    }
}
