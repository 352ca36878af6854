//! Shared test helpers for record tests.

#![allow(dead_code)]

use passmate_record::{LogicalTimestamp, PublicFields, Record};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ts(value: i64) -> LogicalTimestamp {
    LogicalTimestamp::new(value)
}

pub fn vals(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Builds a public field map from `(name, values)` pairs.
pub fn public(entries: &[(&str, &[&str])]) -> PublicFields {
    entries
        .iter()
        .map(|(name, values)| (name.to_string(), vals(values)))
        .collect()
}

/// A record at `path` whose public fields are `entries`, all at timestamp 10.
pub fn record_with(id: &str, path: &str, entries: &[(&str, &[&str])]) -> Record {
    let mut record = Record::new(id);
    record.set_path(ts(10), path).unwrap();
    for (name, values) in entries {
        record
            .update_field(&format!("_{name}"), ts(10), vals(values))
            .unwrap();
    }
    record
}
