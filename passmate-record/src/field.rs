//! Versioned field: a last-writer-wins register over a value sequence.
//!
//! Unlike a peer-tagged register there is no tie-breaker: an incoming write
//! with a timestamp equal to the stored one replaces it, so the last applied
//! write wins on ties.

use passmate_types::LogicalTimestamp;
use serde::{Deserialize, Serialize};

/// A multi-valued field tagged with the timestamp of its last write.
///
/// An empty value sequence is a tombstone: the field is physically present
/// but absent from a record's public view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedField {
    /// Timestamp of the last applied write.
    timestamp: LogicalTimestamp,
    /// The current value sequence.
    value: Vec<String>,
}

impl VersionedField {
    /// Creates a field with an explicit timestamp.
    #[must_use]
    pub fn new(value: Vec<String>, timestamp: LogicalTimestamp) -> Self {
        Self { timestamp, value }
    }

    /// Returns the current value sequence.
    #[must_use]
    pub fn value(&self) -> &[String] {
        &self.value
    }

    /// Returns the timestamp of the last applied write.
    #[must_use]
    pub fn timestamp(&self) -> LogicalTimestamp {
        self.timestamp
    }

    /// Returns true if the value sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.value.first().map(String::as_str)
    }

    /// Writes a value unless the stored timestamp is strictly newer.
    ///
    /// Returns true if the value was updated.
    pub fn set_with_timestamp(&mut self, value: Vec<String>, timestamp: LogicalTimestamp) -> bool {
        if self.should_update(timestamp) {
            self.value = value;
            self.timestamp = timestamp;
            true
        } else {
            false
        }
    }

    /// Determines if an incoming write should win over the current value.
    fn should_update(&self, timestamp: LogicalTimestamp) -> bool {
        !self.timestamp.is_after(&timestamp)
    }

    /// Merges another field into this one, treating it as the incoming write.
    ///
    /// Returns true if this field changed.
    pub fn merge(&mut self, other: &Self) -> bool {
        if self.should_update(other.timestamp) && self != other {
            self.value = other.value.clone();
            self.timestamp = other.timestamp;
            true
        } else {
            false
        }
    }

    /// Creates a new field that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }
}
