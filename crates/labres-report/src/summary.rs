//! Serializable roll-up of a whole processing run.

use std::collections::BTreeMap;

use labres_model::{ClassifiedResult, CleaningReport, Status};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::abnormal::abnormal_results;
use crate::aggregate::{category_counts, status_counts};

/// The structured report handed to the storage and presentation
/// collaborators, alongside the classified record set itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub cleaning: CleaningReport,
    pub total_results: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub category_counts: BTreeMap<String, usize>,
    pub abnormal: Vec<AbnormalEntry>,
}

/// One abnormal result, compacted for the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbnormalEntry {
    pub patient_id: String,
    pub test_code: String,
    pub value: f64,
    pub status: Status,
    pub is_significant: bool,
    /// Absolute deviation from the nearer bound of the applied range.
    pub deviation: f64,
}

/// Build the run summary from the cleaning report and classified results.
pub fn summarize(cleaning: &CleaningReport, results: &[ClassifiedResult]) -> PipelineSummary {
    let abnormal: Vec<AbnormalEntry> = abnormal_results(results)
        .iter()
        .map(|result| AbnormalEntry {
            patient_id: result.patient_id.clone(),
            test_code: result.test_code.clone(),
            value: result.value.unwrap_or(f64::NAN),
            status: result.status,
            is_significant: result.is_significant,
            deviation: result.deviation().unwrap_or(0.0),
        })
        .collect();

    info!(
        results = results.len(),
        abnormal = abnormal.len(),
        "summary built"
    );

    PipelineSummary {
        cleaning: cleaning.clone(),
        total_results: results.len(),
        status_counts: status_counts(results),
        category_counts: category_counts(results),
        abnormal,
    }
}
