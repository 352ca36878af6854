//! Logical clock values for field versioning.
//!
//! Timestamps are supplied by callers and only compared per field, never
//! across records. The core carries no clock of its own, so skew between
//! clients is the caller's concern.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 64-bit signed logical timestamp.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LogicalTimestamp(i64);

impl LogicalTimestamp {
    /// Creates a timestamp from a raw clock value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw clock value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns the following timestamp, saturating at `i64::MAX`.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns true if this timestamp is strictly older than the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this timestamp is strictly newer than the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl From<i64> for LogicalTimestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LogicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LogicalTimestamp {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| crate::Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }
}
