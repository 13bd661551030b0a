//! Per-test 3-sigma outlier screening.
//!
//! The mean and population sigma are computed over all present values,
//! outlier candidates included. This is the documented, non-iterative rule:
//! it is susceptible to masking (one extreme value inflating sigma enough to
//! pass its own test), and downstream consumers depend on exactly these
//! semantics, so no robust estimator is substituted.

use std::collections::BTreeMap;

use labres_model::CleanedRecord;
use tracing::debug;

use crate::stats::ColumnStats;

/// Null values outside `mean ± 3 sigma`, per test column independently.
///
/// Outliers are converted to missing rather than dropping the record, so
/// the rest of the record survives. Columns where sigma is zero, or with
/// fewer than two present values, flag nothing.
///
/// Returns the screened records and the per-test count of nulled values.
pub fn null_outliers(
    mut records: Vec<CleanedRecord>,
) -> (Vec<CleanedRecord>, BTreeMap<String, usize>) {
    let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in &records {
        for (test, value) in &record.values {
            if let Some(v) = value {
                columns.entry(test.clone()).or_default().push(*v);
            }
        }
    }

    let mut bounds: BTreeMap<String, ColumnStats> = BTreeMap::new();
    for (test, values) in &columns {
        if values.len() < 2 {
            continue;
        }
        if let Some(stats) = ColumnStats::compute(values) {
            if stats.std_dev == 0.0 {
                continue;
            }
            let (low, high) = stats.three_sigma_bounds();
            debug!(test = %test, n = stats.count, mean = stats.mean, low, high, "sigma bounds");
            bounds.insert(test.clone(), stats);
        }
    }

    let mut removed: BTreeMap<String, usize> = BTreeMap::new();
    for record in &mut records {
        for (test, value) in &mut record.values {
            let Some(stats) = bounds.get(test) else {
                continue;
            };
            if let Some(v) = *value
                && stats.is_outlier(v)
            {
                *value = None;
                *removed.entry(test.clone()).or_default() += 1;
            }
        }
    }

    (records, removed)
}
