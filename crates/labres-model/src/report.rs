//! Structured cleaning report, returned alongside the cleaned record set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counts produced by the cleaning stage.
///
/// Anomalies are degraded gracefully and counted here; nothing in the
/// cleaning stage raises on a bad data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub removed_empty: usize,
    pub removed_duplicates: usize,
    /// Cells that held a non-numeric, non-empty value. Counted separately
    /// from outliers.
    pub non_numeric_values: usize,
    /// Per-test count of values nulled by 3-sigma screening.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outliers_removed: BTreeMap<String, usize>,
    /// Raw columns that matched no canonical test; their values survive
    /// cleaning but are excluded from classification.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped_columns: Vec<String>,
}

impl CleaningReport {
    /// Total values nulled by outlier screening, across all tests.
    pub fn total_outliers(&self) -> usize {
        self.outliers_removed.values().sum()
    }

    /// Records dropped by any pass.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_roll_up() {
        let mut report = CleaningReport {
            rows_before: 10,
            rows_after: 7,
            removed_empty: 2,
            removed_duplicates: 1,
            ..CleaningReport::default()
        };
        report.outliers_removed.insert("chem.glucose".to_string(), 2);
        report.outliers_removed.insert("bc.hemoglobin".to_string(), 1);
        assert_eq!(report.total_outliers(), 3);
        assert_eq!(report.rows_removed(), 3);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = CleaningReport {
            rows_before: 2,
            rows_after: 2,
            ..CleaningReport::default()
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: CleaningReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
