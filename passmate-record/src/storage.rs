//! Storage port driven by reconciliation.
//!
//! The port is addressed by a record's resolved path, not by its id. The
//! concrete backend lives outside this crate; [`MemoryStorage`] is an
//! in-process implementation for dry-run replays and tests.

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for storage port calls.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a storage port.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the write.
    #[error("backend error: {0}")]
    Backend(String),

    /// The addressed record or field does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Write sink for record fields.
pub trait FieldStorage {
    /// Sets a public field of the record at `path`.
    fn set_field(&mut self, path: &str, name: &str, value: &[String]) -> StorageResult<()>;

    /// Removes a public field of the record at `path`.
    fn unset_field(&mut self, path: &str, name: &str) -> StorageResult<()>;
}

/// One call received by a [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set {
        path: String,
        name: String,
        value: Vec<String>,
    },
    Unset {
        path: String,
        name: String,
    },
}

/// In-memory storage keyed by path, recording every call it receives.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    log: Vec<StorageOp>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the fields stored at `path`, without logging an operation.
    pub fn insert_record(&mut self, path: impl Into<String>, fields: BTreeMap<String, Vec<String>>) {
        self.records.insert(path.into(), fields);
    }

    /// Returns the fields stored at `path`.
    #[must_use]
    pub fn record(&self, path: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.records.get(path)
    }

    /// Returns every call received so far, in order.
    #[must_use]
    pub fn operations(&self) -> &[StorageOp] {
        &self.log
    }
}

impl FieldStorage for MemoryStorage {
    fn set_field(&mut self, path: &str, name: &str, value: &[String]) -> StorageResult<()> {
        self.log.push(StorageOp::Set {
            path: path.to_string(),
            name: name.to_string(),
            value: value.to_vec(),
        });
        self.records
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), value.to_vec());
        Ok(())
    }

    fn unset_field(&mut self, path: &str, name: &str) -> StorageResult<()> {
        self.log.push(StorageOp::Unset {
            path: path.to_string(),
            name: name.to_string(),
        });
        let fields = self
            .records
            .get_mut(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        fields
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(format!("{path}/{name}")))
    }
}
