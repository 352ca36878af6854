//! Error types for the record core.

use crate::storage::StorageError;
use passmate_types::RecordId;
use thiserror::Error;

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that can occur in record operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Two internal field names map to the same public name.
    #[error("duplicate public field {field:?} in record {record_id}")]
    DataIntegrityFault { record_id: RecordId, field: String },

    /// A caller passed an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The storage port failed during reconciliation.
    #[error("storage port failure: {0}")]
    Port(#[from] StorageError),

    /// Two replicas of different records were merged.
    #[error("cannot merge record {found} into record {expected}")]
    IdMismatch { expected: RecordId, found: RecordId },
}
