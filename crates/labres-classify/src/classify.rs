//! Status classification and severity flagging.

use labres_model::{
    ClassifiedResult, ClassifyOptions, CleanedRecord, RangeTable, ReferenceRange, Status,
    TestCatalog,
};
use tracing::info;

use crate::resolve::resolve_range;

/// Classify one value against a range. Bounds are inclusive: a value equal
/// to either bound is NORMAL.
pub fn classify(value: f64, range: &ReferenceRange) -> Status {
    if value < range.low {
        Status::Low
    } else if value > range.high {
        Status::High
    } else {
        Status::Normal
    }
}

/// Whether a value is significantly abnormal: more than `margin` past the
/// violated bound (e.g. margin 0.5 means below half the lower bound or
/// above 1.5x the upper bound).
pub fn is_significant(value: f64, range: &ReferenceRange, margin: f64) -> bool {
    value < range.low * (1.0 - margin) || value > range.high * (1.0 + margin)
}

/// Classify every catalog-mapped value of a cleaned batch.
///
/// Walks each record's values in key order. Columns not present in the
/// catalog were left unmapped upstream; they stay in the cleaned table but
/// are excluded here. Missing values (empty cells and nulled outliers) and
/// values with no resolvable range come back as UNKNOWN — classification is
/// total and never fails on a data row.
pub fn classify_records(
    records: &[CleanedRecord],
    catalog: &TestCatalog,
    table: &RangeTable,
    options: &ClassifyOptions,
) -> Vec<ClassifiedResult> {
    let mut results = Vec::new();
    for record in records {
        let age_group = record.age_group();
        for (test_code, value) in &record.values {
            if !catalog.contains(test_code) {
                continue;
            }
            let resolved = resolve_range(test_code, record.sex, age_group, table);
            let result = match (value, resolved) {
                (Some(v), Some(range)) => ClassifiedResult {
                    patient_id: record.patient_id.clone(),
                    test_code: test_code.clone(),
                    value: Some(*v),
                    timestamp: record.timestamp,
                    status: classify(*v, range),
                    is_significant: is_significant(*v, range, options.margin),
                    range: Some(range.clone()),
                },
                _ => ClassifiedResult {
                    patient_id: record.patient_id.clone(),
                    test_code: test_code.clone(),
                    value: *value,
                    timestamp: record.timestamp,
                    status: Status::Unknown,
                    is_significant: false,
                    range: None,
                },
            };
            results.push(result);
        }
    }
    let unknown = results
        .iter()
        .filter(|r| r.status == Status::Unknown)
        .count();
    info!(
        results = results.len(),
        unknown,
        abnormal = results.iter().filter(|r| r.status.is_abnormal()).count(),
        "classification complete"
    );
    results
}
