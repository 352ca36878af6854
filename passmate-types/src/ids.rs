//! Identifier types for records.
//!
//! Record ids are opaque to the core. Freshly created records get a UUID v7
//! so ids sort roughly by creation time, but any string loaded from the
//! backend is accepted verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Id carried by a default-constructed, invalid record.
pub const INVALID_RECORD_ID: &str = "INVALID";

/// Opaque identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an existing identifier verbatim.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new unique record id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the sentinel id used by invalid records.
    #[must_use]
    pub fn invalid() -> Self {
        Self(INVALID_RECORD_ID.to_string())
    }

    /// Returns true if this is the sentinel id.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.0 == INVALID_RECORD_ID
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for RecordId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(crate::Error::InvalidRecordId(
                "record id must not be empty".to_string(),
            ));
        }
        Ok(Self::new(s))
    }
}
