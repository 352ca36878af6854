//! Core type definitions for Passmate records.
//!
//! This crate defines the primitives shared by the record core:
//! - Record identifiers (opaque strings, UUID v7 text when generated)
//! - Logical timestamps used for last-writer-wins field resolution

mod ids;
mod timestamp;

pub use ids::{INVALID_RECORD_ID, RecordId};
pub use timestamp::LogicalTimestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing type values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
