//! End-to-end pipeline over one uploaded table.
//!
//! Stages run in strict sequence on an immutable input snapshot: column
//! canonicalization, cleaning, classification, aggregation. Each stage is a
//! pure function; a failed run leaves nothing behind to roll back.

use std::collections::{BTreeMap, BTreeSet};

use labres_classify::classify_records;
use labres_clean::clean;
use labres_cli::logging::redact_value;
use labres_map::{
    apply_mapping, cluster_names, create_mapping, extend_mapping_with_clusters, unmapped_names,
};
use labres_model::{
    ClassifiedResult, ClassifyOptions, CleanOptions, CleanedRecord, MapOptions, RangeTable,
    RawRecord, Result, TestCatalog,
};
use labres_report::{PatientChart, PipelineSummary, chart_data, summarize};
use tracing::{info, info_span, trace};

/// Per-run configuration, one field per stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineConfig {
    pub map: MapOptions,
    pub clean: CleanOptions,
    pub classify: ClassifyOptions,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub cleaned: Vec<CleanedRecord>,
    pub classified: Vec<ClassifiedResult>,
    pub summary: PipelineSummary,
    pub charts: BTreeMap<String, PatientChart>,
}

/// Run the full pipeline over one batch of raw records.
///
/// # Errors
///
/// Only structural corruption is fatal (a record without its identity
/// field); every data-quality anomaly degrades into a report count.
pub fn run_pipeline(
    records: &[RawRecord],
    catalog: &TestCatalog,
    ranges: &RangeTable,
    config: &PipelineConfig,
) -> Result<PipelineOutcome> {
    let span = info_span!("pipeline", rows = records.len());
    let _guard = span.enter();

    // Canonicalization artifacts for this batch's column names: direct
    // catalog matches first, then clusters vouching for near-variants.
    let columns = collect_columns(records);
    let mut mapping = create_mapping(&columns, catalog, &config.map);
    let clusters = cluster_names(&columns, config.map.threshold);
    extend_mapping_with_clusters(&mut mapping, &clusters);
    let unmapped = unmapped_names(&mapping);
    let relabeled = apply_mapping(records, &mapping);
    info!(
        columns = columns.len(),
        clusters = clusters.len(),
        unmapped = unmapped.len(),
        "canonicalization complete"
    );

    // Statistical cleaning.
    let outcome = clean(relabeled, &config.clean)?;
    let mut report = outcome.report;
    report.unmapped_columns = unmapped;

    // Classification and the aggregated views over it.
    let classified = classify_records(&outcome.records, catalog, ranges, &config.classify);
    for result in &classified {
        // Measured values are PHI: redacted unless --log-data is set.
        let rendered = result
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "missing".to_string());
        trace!(
            patient = %result.patient_id,
            test = %result.test_code,
            value = %redact_value(&rendered),
            status = %result.status,
            "classified result"
        );
    }
    let summary = summarize(&report, &classified);
    let charts = chart_data(&classified);

    Ok(PipelineOutcome {
        cleaned: outcome.records,
        classified,
        summary,
        charts,
    })
}

/// Distinct column names across the batch, first-seen order.
fn collect_columns(records: &[RawRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::new();
    for record in records {
        for name in record.values.keys() {
            if seen.insert(name.clone()) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use labres_model::{CanonicalTest, ReferenceRange, Status};

    use super::*;

    fn standards() -> (TestCatalog, RangeTable) {
        let mut glucose = CanonicalTest::new("chem.glucose", "Glucose");
        glucose.add_alias("Глюкоза");
        let mut hemoglobin = CanonicalTest::new("bc.hemoglobin", "Hemoglobin");
        hemoglobin.add_alias("Гемоглобин");
        let catalog: TestCatalog = [glucose, hemoglobin].into_iter().collect();

        let mut ranges = RangeTable::new();
        ranges.push(ReferenceRange::overall("chem.glucose", 3.9, 5.9));
        ranges.push(ReferenceRange::overall("bc.hemoglobin", 120.0, 160.0));
        (catalog, ranges)
    }

    fn record(patient: &str, values: &[(&str, &str)]) -> RawRecord {
        let mut rec = RawRecord::new(patient);
        for (name, value) in values {
            rec.values.insert((*name).to_string(), (*value).to_string());
        }
        rec
    }

    #[test]
    fn end_to_end_over_a_mixed_language_batch() {
        let (catalog, ranges) = standards();
        let records = vec![
            record("p1", &[("Глюкоза", "5.1"), ("Hemoglobin", "115")]),
            record("p2", &[("Глюкоза", "7.2"), ("Hemoglobin", "140")]),
            record("p3", &[("Глюкоза", ""), ("Hemoglobin", "")]),
            record("p2", &[("Глюкоза", "7.2"), ("Hemoglobin", "140")]),
            record("p4", &[("Mystery Marker", "3.0")]),
        ];

        let outcome =
            run_pipeline(&records, &catalog, &ranges, &PipelineConfig::default()).unwrap();

        // p3 is empty, the repeated p2 row is a duplicate.
        assert_eq!(outcome.summary.cleaning.rows_before, 5);
        assert_eq!(outcome.summary.cleaning.removed_empty, 1);
        assert_eq!(outcome.summary.cleaning.removed_duplicates, 1);
        assert_eq!(outcome.cleaned.len(), 3);

        // The unmapped column is surfaced, not dropped.
        assert_eq!(
            outcome.summary.cleaning.unmapped_columns,
            vec!["Mystery Marker".to_string()]
        );
        assert!(outcome.cleaned[2].values.contains_key("Mystery Marker"));

        // p1: glucose normal, hemoglobin low. p2: glucose high.
        let p1_hemoglobin = outcome
            .classified
            .iter()
            .find(|r| r.patient_id == "p1" && r.test_code == "bc.hemoglobin")
            .unwrap();
        assert_eq!(p1_hemoglobin.status, Status::Low);
        let p2_glucose = outcome
            .classified
            .iter()
            .find(|r| r.patient_id == "p2" && r.test_code == "chem.glucose")
            .unwrap();
        assert_eq!(p2_glucose.status, Status::High);

        // Unmapped values never reach classification.
        assert!(
            outcome
                .classified
                .iter()
                .all(|r| r.test_code != "Mystery Marker")
        );

        // Charts cover every patient with at least one classified result;
        // p4 only carried the unmapped column.
        assert_eq!(outcome.charts.len(), 2);
        assert!(outcome.charts.contains_key("p1"));
        assert!(outcome.charts.contains_key("p2"));
    }

    #[test]
    fn rerun_is_deterministic() {
        let (catalog, ranges) = standards();
        let records = vec![
            record("p1", &[("Глюкоза", "5.1"), ("glucose ", "5.1")]),
            record("p2", &[("Глюкоза", "4.4")]),
        ];
        let config = PipelineConfig::default();
        let first = run_pipeline(&records, &catalog, &ranges, &config).unwrap();
        let second = run_pipeline(&records, &catalog, &ranges, &config).unwrap();
        assert_eq!(first.classified, second.classified);
        assert_eq!(first.summary, second.summary);
    }
}
