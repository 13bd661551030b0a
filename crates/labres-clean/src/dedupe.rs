//! Empty-record and duplicate-record removal.

use std::collections::BTreeSet;

use labres_model::{RawRecord, parse_value};

/// True when no value in the record parses as a finite number.
pub fn is_empty_record(record: &RawRecord) -> bool {
    !record.values.values().any(|raw| parse_value(raw).is_some())
}

/// Composite duplicate key: patient, timestamp, and the full value set.
///
/// `values` is a `BTreeMap`, so two records that differ only in source
/// field order produce the same key.
fn duplicate_key(record: &RawRecord) -> String {
    let mut key = String::new();
    key.push_str(&record.patient_id);
    key.push('|');
    if let Some(ts) = record.timestamp {
        key.push_str(&ts.to_string());
    }
    for (name, value) in &record.values {
        key.push('|');
        key.push_str(name);
        key.push('=');
        key.push_str(value.trim());
    }
    key
}

/// Drop exact duplicates, keeping the first occurrence of each key.
///
/// Returns the survivors and the number of records removed.
pub fn remove_duplicates(records: Vec<RawRecord>) -> (Vec<RawRecord>, usize) {
    let mut seen = BTreeSet::new();
    let before = records.len();
    let survivors: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| seen.insert(duplicate_key(record)))
        .collect();
    let removed = before - survivors.len();
    (survivors, removed)
}

/// Drop records with no numeric value at all.
///
/// Returns the survivors and the number of records removed.
pub fn remove_empty(records: Vec<RawRecord>) -> (Vec<RawRecord>, usize) {
    let before = records.len();
    let survivors: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| !is_empty_record(record))
        .collect();
    let removed = before - survivors.len();
    (survivors, removed)
}
