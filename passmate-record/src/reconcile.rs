//! Reconciliation of a record's public fields against a desired field set.
//!
//! Changes are applied in three phases: additions, then updates, then
//! deletions, each in name order. Backends may rely on that order, so every
//! reconciliation issues its port calls in exactly the order of the summary.

use crate::error::RecordResult;
use crate::record::{PublicFields, Record};
use crate::storage::FieldStorage;
use std::fmt;
use tracing::{debug, trace};

/// Where reconciliation writes go.
pub enum Destination<'a> {
    /// Drive the given storage port.
    Apply(&'a mut dyn FieldStorage),
    /// Compute the summary only; no port calls are made.
    DryRun,
}

impl Destination<'_> {
    /// Returns true for [`Destination::DryRun`].
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply(_) => f.write_str("Apply(..)"),
            Self::DryRun => f.write_str("DryRun"),
        }
    }
}

impl<'a, S: FieldStorage> From<&'a mut S> for Destination<'a> {
    fn from(storage: &'a mut S) -> Self {
        Self::Apply(storage)
    }
}

/// Category of a single field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    New,
    Changed,
    Deleted,
}

impl ChangeKind {
    /// Human-readable label used in summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "New field",
            Self::Changed => "Changed field",
            Self::Deleted => "Deleted field",
        }
    }
}

/// One changed public field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub kind: ChangeKind,
    pub name: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.name)
    }
}

/// Ordered list of changes produced by a reconciliation.
///
/// Displays as one newline-terminated line per change, or as the empty
/// string when nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    changes: Vec<FieldChange>,
}

impl ChangeSummary {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns the changes in the order they were applied.
    #[must_use]
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Counts changes of one kind.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    fn push(&mut self, kind: ChangeKind, name: &str) {
        self.changes.push(FieldChange {
            kind,
            name: name.to_string(),
        });
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{change}")?;
        }
        Ok(())
    }
}

impl Record {
    /// Reconciles the public fields with `new_fields`.
    ///
    /// With [`Destination::Apply`], every summary entry is mirrored by one
    /// port call addressed by [`Record::path`]: `set_field` for new and
    /// changed fields, `unset_field` for deleted ones. A port failure aborts
    /// immediately and leaves earlier writes in place.
    ///
    /// The record itself is not modified.
    pub fn reconcile_fields(
        &self,
        mut destination: Destination<'_>,
        new_fields: &PublicFields,
    ) -> RecordResult<ChangeSummary> {
        let old_fields = self.public_fields()?;
        let path = self.path();
        let mut summary = ChangeSummary::default();

        debug!(
            record_id = %self.id(),
            %path,
            dry_run = destination.is_dry_run(),
            "reconciling record fields"
        );

        for (name, value) in new_fields {
            if !old_fields.contains_key(name) {
                summary.push(ChangeKind::New, name);
                if let Destination::Apply(storage) = &mut destination {
                    trace!(%path, field = %name, "set new field");
                    storage.set_field(&path, name, value)?;
                }
            }
        }

        for (name, value) in new_fields {
            if old_fields.get(name).is_some_and(|old| old != value) {
                summary.push(ChangeKind::Changed, name);
                if let Destination::Apply(storage) = &mut destination {
                    trace!(%path, field = %name, "set changed field");
                    storage.set_field(&path, name, value)?;
                }
            }
        }

        for name in old_fields.keys() {
            if !new_fields.contains_key(name) {
                summary.push(ChangeKind::Deleted, name);
                if let Destination::Apply(storage) = &mut destination {
                    trace!(%path, field = %name, "unset field");
                    storage.unset_field(&path, name)?;
                }
            }
        }

        debug!(record_id = %self.id(), changes = summary.len(), "reconciled record fields");
        Ok(summary)
    }

    /// Computes the changes [`Record::reconcile_fields`] would make.
    pub fn plan_fields(&self, new_fields: &PublicFields) -> RecordResult<ChangeSummary> {
        self.reconcile_fields(Destination::DryRun, new_fields)
    }
}
