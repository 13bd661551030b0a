//! The cleaning stage: structural validation, record drops, outlier nulling.
//!
//! `clean` is a pure function of its input batch: same records and options
//! in, same records and report out, no hidden state. Data-quality problems
//! degrade gracefully and are counted; only structurally corrupt input (a
//! record without its identity field) is fatal, and it fails fast.

use labres_model::{
    CleanOptions, CleanedRecord, CleaningReport, LabError, RawRecord, Result, parse_value,
};
use tracing::info;

use crate::dedupe::{remove_duplicates, remove_empty};
use crate::outliers::null_outliers;

/// The cleaned batch together with its report.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub records: Vec<CleanedRecord>,
    pub report: CleaningReport,
}

/// Clean a batch of raw records.
///
/// Passes run in a fixed order: empty-record removal, duplicate removal,
/// numeric conversion, outlier screening. Each is gated by [`CleanOptions`].
///
/// # Errors
///
/// [`LabError::InvalidRecord`] when a record has an empty `patient_id`;
/// the index identifies the offending record and the rest of the batch is
/// not processed.
pub fn clean(records: Vec<RawRecord>, options: &CleanOptions) -> Result<CleanOutcome> {
    validate_structure(&records)?;

    let mut report = CleaningReport {
        rows_before: records.len(),
        ..CleaningReport::default()
    };

    let mut batch = records;
    if options.remove_empty {
        let (survivors, removed) = remove_empty(batch);
        batch = survivors;
        report.removed_empty = removed;
    }
    if options.remove_duplicates {
        let (survivors, removed) = remove_duplicates(batch);
        batch = survivors;
        report.removed_duplicates = removed;
    }

    let mut cleaned = Vec::with_capacity(batch.len());
    for record in &batch {
        cleaned.push(convert_record(record, &mut report.non_numeric_values));
    }

    if options.remove_outliers {
        let (screened, removed) = null_outliers(cleaned);
        cleaned = screened;
        report.outliers_removed = removed;
    }

    report.rows_after = cleaned.len();
    info!(
        rows_before = report.rows_before,
        rows_after = report.rows_after,
        removed_empty = report.removed_empty,
        removed_duplicates = report.removed_duplicates,
        outliers = report.total_outliers(),
        "cleaning complete"
    );

    Ok(CleanOutcome {
        records: cleaned,
        report,
    })
}

/// Fail fast on structural corruption; data-quality issues are not errors.
fn validate_structure(records: &[RawRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.patient_id.trim().is_empty() {
            return Err(LabError::InvalidRecord {
                index,
                reason: "missing patient_id".to_string(),
            });
        }
    }
    Ok(())
}

/// Parse raw values to numbers; non-numeric, non-empty cells are counted.
fn convert_record(record: &RawRecord, non_numeric: &mut usize) -> CleanedRecord {
    let values = record
        .values
        .iter()
        .map(|(test, raw)| {
            let parsed = parse_value(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                *non_numeric += 1;
            }
            (test.clone(), parsed)
        })
        .collect();
    CleanedRecord {
        patient_id: record.patient_id.clone(),
        sex: record.sex,
        age: record.age,
        timestamp: record.timestamp,
        values,
    }
}
