//! Timestamp-reconciled field store for Passmate records.
//!
//! A [`Record`] holds one entity's fields, each a [`VersionedField`] resolved
//! with last-writer-wins semantics on a per-field [`LogicalTimestamp`]:
//!
//! - Stale writes (stored timestamp strictly newer) are ignored silently
//! - Ties favor the incoming write
//! - Fields named `_<name>` are public as `<name>`; `PATH` never is
//! - Empty value sequences are tombstones and vanish from the public view
//!
//! [`Record::reconcile_fields`] diffs the public view against a desired field
//! set and drives a [`FieldStorage`] port, or only reports the changes when
//! given [`Destination::DryRun`].

mod error;
mod field;
mod reconcile;
mod record;
mod storage;

pub use error::{RecordError, RecordResult};
pub use field::VersionedField;
pub use passmate_types::{LogicalTimestamp, RecordId};
pub use reconcile::{ChangeKind, ChangeSummary, Destination, FieldChange};
pub use record::{INTERNAL_PREFIX, PATH_FIELD, PublicFields, Record};
pub use storage::{FieldStorage, MemoryStorage, StorageError, StorageOp, StorageResult};
