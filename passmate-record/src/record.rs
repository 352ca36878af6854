//! Record: one entity's versioned field set.
//!
//! Field naming contract:
//! - `_<name>` is the internal form of the public field `<name>`
//! - `PATH` holds the record's location and is read through [`Record::path`]
//! - anything else is bookkeeping and never public

use crate::error::{RecordError, RecordResult};
use crate::field::VersionedField;
use passmate_types::{LogicalTimestamp, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use tracing::{debug, trace};

/// Marker prefix of internal names that map to public fields.
pub const INTERNAL_PREFIX: char = '_';

/// Reserved field storing the record's path.
pub const PATH_FIELD: &str = "PATH";

/// Public field name to value sequence.
pub type PublicFields = BTreeMap<String, Vec<String>>;

/// In-memory representation of one entity's versioned fields.
///
/// Mutation needs `&mut self`; the record does no locking of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    valid: bool,
    fields: BTreeMap<String, VersionedField>,
}

impl Record {
    /// Creates an empty, valid record.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            valid: true,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a valid record from loader-supplied raw fields.
    ///
    /// Entries go through the same last-writer-wins gate as
    /// [`Record::update_field`], so duplicates resolve to the newest version.
    /// Values are not validated: empty sequences load as tombstones.
    pub fn from_fields<I, S>(id: impl Into<RecordId>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, (LogicalTimestamp, Vec<String>))>,
        S: Into<String>,
    {
        let mut record = Self::new(id);
        for (name, (timestamp, value)) in fields {
            record.apply(name.into(), timestamp, value);
        }
        record
    }

    /// Returns the record's id.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns false for a default-constructed record.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the raw internal field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&VersionedField> {
        self.fields.get(name)
    }

    /// Iterates over all internal fields, including `PATH` and tombstones.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &VersionedField)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Writes a field unless the stored version is strictly newer.
    ///
    /// Returns `Ok(true)` if the write was applied and `Ok(false)` if it was
    /// stale. Empty names and empty value sequences are rejected; use
    /// [`Record::clear_field`] to delete a field.
    pub fn update_field(
        &mut self,
        name: &str,
        timestamp: LogicalTimestamp,
        value: Vec<String>,
    ) -> RecordResult<bool> {
        if name.is_empty() {
            return Err(RecordError::InvalidArgument(
                "field name must not be empty".to_string(),
            ));
        }
        if value.is_empty() {
            return Err(RecordError::InvalidArgument(format!(
                "empty value for field {name:?}, use clear_field to delete"
            )));
        }
        Ok(self.apply(name.to_string(), timestamp, value))
    }

    /// Deletes a field by writing an empty value sequence at `timestamp`.
    ///
    /// The tombstone obeys the same last-writer-wins rule as any write.
    pub fn clear_field(&mut self, name: &str, timestamp: LogicalTimestamp) -> RecordResult<bool> {
        if name.is_empty() {
            return Err(RecordError::InvalidArgument(
                "field name must not be empty".to_string(),
            ));
        }
        Ok(self.apply(name.to_string(), timestamp, Vec::new()))
    }

    /// Sets the record's path.
    pub fn set_path(&mut self, timestamp: LogicalTimestamp, path: &str) -> RecordResult<bool> {
        self.update_field(PATH_FIELD, timestamp, vec![path.to_string()])
    }

    fn apply(&mut self, name: String, timestamp: LogicalTimestamp, value: Vec<String>) -> bool {
        match self.fields.entry(name) {
            Entry::Vacant(slot) => {
                trace!(record_id = %self.id, field = %slot.key(), %timestamp, "new field");
                slot.insert(VersionedField::new(value, timestamp));
                true
            }
            Entry::Occupied(mut slot) => {
                let stored = slot.get().timestamp();
                let applied = slot.get_mut().set_with_timestamp(value, timestamp);
                if !applied {
                    debug!(
                        record_id = %self.id,
                        field = %slot.key(),
                        %stored,
                        incoming = %timestamp,
                        "ignoring stale field update"
                    );
                }
                applied
            }
        }
    }

    /// Merges another replica of this record field by field.
    ///
    /// Every internal field of `other`, tombstones and `PATH` included, is
    /// offered as an incoming write. Returns the number of fields changed.
    pub fn merge(&mut self, other: &Record) -> RecordResult<usize> {
        if self.id != other.id {
            return Err(RecordError::IdMismatch {
                expected: self.id.clone(),
                found: other.id.clone(),
            });
        }

        let mut changed = 0;
        for (name, incoming) in &other.fields {
            match self.fields.get_mut(name) {
                Some(field) => {
                    if field.merge(incoming) {
                        changed += 1;
                    }
                }
                None => {
                    self.fields.insert(name.clone(), incoming.clone());
                    changed += 1;
                }
            }
        }
        debug!(record_id = %self.id, changed, "merged record replica");
        Ok(changed)
    }

    /// Returns the public view: prefix-stripped names with non-empty values.
    ///
    /// Fails with [`RecordError::DataIntegrityFault`] if two internal names
    /// strip to the same public name.
    pub fn public_fields(&self) -> RecordResult<PublicFields> {
        let mut public = PublicFields::new();

        for (name, field) in &self.fields {
            let Some(public_name) = name.strip_prefix(INTERNAL_PREFIX) else {
                continue;
            };
            if public.contains_key(public_name) {
                return Err(RecordError::DataIntegrityFault {
                    record_id: self.id.clone(),
                    field: public_name.to_string(),
                });
            }
            public.insert(public_name.to_string(), field.value().to_vec());
        }

        public.retain(|_, value| !value.is_empty());
        Ok(public)
    }

    /// Returns true if the record has no resolvable path.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.resolved_path().is_none()
    }

    /// Returns the record's path, or a synthetic one if it has none.
    ///
    /// - `PATH` absent: `@UnnamedRecord/<id>`
    /// - `PATH` empty or with an empty first value: `@DeletedRecord/<id>`
    #[must_use]
    pub fn path(&self) -> String {
        match self.fields.get(PATH_FIELD) {
            None => format!("@UnnamedRecord/{}", self.id),
            Some(_) => match self.resolved_path() {
                Some(path) => path.to_string(),
                None => format!("@DeletedRecord/{}", self.id),
            },
        }
    }

    fn resolved_path(&self) -> Option<&str> {
        self.fields
            .get(PATH_FIELD)
            .and_then(VersionedField::first)
            .filter(|path| !path.is_empty())
    }
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: RecordId::invalid(),
            valid: false,
            fields: BTreeMap::new(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\trid={}", self.id)?;
        let public = match self.public_fields() {
            Ok(public) => public,
            Err(e) => return writeln!(f, "\t{e}"),
        };
        for (name, values) in &public {
            write!(f, "\t{name}=(")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "'{value}'")?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}
