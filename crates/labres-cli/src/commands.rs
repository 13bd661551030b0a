//! Command implementations.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use labres_model::{
    ClassifyOptions, CleanOptions, MapOptions, RangeTable, TestCatalog,
};
use labres_standards::{default_catalog_path, default_ranges_path, load_catalog, load_ranges};

use crate::cli::ProcessArgs;
use crate::pipeline::{PipelineConfig, PipelineOutcome, run_pipeline};
use crate::summary::print_catalog;
use crate::types::{OutputPaths, ProcessResult};

/// Run the `process` command: ingest, canonicalize, clean, classify,
/// aggregate, and (unless dry-run) write artifacts.
pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let (catalog, ranges) = load_standards(args.standards_dir.as_deref())?;

    let records = labres_ingest::read_records(&args.file)
        .with_context(|| format!("ingest {}", args.file.display()))?;
    info!(rows = records.len(), input = %args.file.display(), "table ingested");

    let config = PipelineConfig {
        map: MapOptions::new().with_threshold(args.threshold),
        clean: CleanOptions::new()
            .with_remove_empty(!args.keep_empty)
            .with_remove_duplicates(!args.keep_duplicates)
            .with_remove_outliers(!args.keep_outliers),
        classify: ClassifyOptions::new().with_margin(args.margin),
    };

    let rows_ingested = records.len();
    let outcome = run_pipeline(&records, &catalog, &ranges, &config)?;

    let outputs = if args.dry_run {
        OutputPaths::default()
    } else {
        write_outputs(args, &outcome)?
    };

    Ok(ProcessResult {
        input: args.file.clone(),
        rows_ingested,
        outcome,
        outputs,
    })
}

/// Run the `tests` command: print the canonical catalog with its ranges.
pub fn run_tests() -> Result<()> {
    let (catalog, ranges) = load_standards(None)?;
    print_catalog(&catalog, &ranges);
    Ok(())
}

fn load_standards(dir: Option<&Path>) -> Result<(TestCatalog, RangeTable)> {
    let (catalog_path, ranges_path) = match dir {
        Some(dir) => (dir.join("catalog.json"), dir.join("reference_ranges.csv")),
        None => (default_catalog_path(), default_ranges_path()),
    };
    let catalog = load_catalog(&catalog_path).context("load test catalog")?;
    let ranges = load_ranges(&ranges_path).context("load reference ranges")?;
    Ok((catalog, ranges))
}

fn write_outputs(args: &ProcessArgs, outcome: &PipelineOutcome) -> Result<OutputPaths> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => {
            let stem = args
                .file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("table");
            args.file
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(format!("{stem}-out"))
        }
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let cleaned_csv = output_dir.join("cleaned.csv");
    write_cleaned_csv(&cleaned_csv, outcome)?;

    let classified_json = output_dir.join("classified.json");
    write_json(&classified_json, &outcome.classified)?;

    let summary_json = output_dir.join("summary.json");
    write_json(&summary_json, &outcome.summary)?;

    let charts_json = output_dir.join("charts.json");
    write_json(&charts_json, &outcome.charts)?;

    info!(dir = %output_dir.display(), "artifacts written");
    Ok(OutputPaths {
        cleaned_csv: Some(cleaned_csv),
        classified_json: Some(classified_json),
        summary_json: Some(summary_json),
        charts_json: Some(charts_json),
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the cleaned table back out as a wide CSV: identity columns first,
/// then every test column in code order. Missing values stay empty cells.
fn write_cleaned_csv(path: &Path, outcome: &PipelineOutcome) -> Result<()> {
    let mut test_columns: BTreeSet<&str> = BTreeSet::new();
    for record in &outcome.cleaned {
        for name in record.values.keys() {
            test_columns.insert(name);
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut header = vec!["patient_id", "sex", "age", "date"];
    header.extend(test_columns.iter().copied());
    writer.write_record(&header).context("write csv header")?;

    for record in &outcome.cleaned {
        let mut row: Vec<String> = vec![
            record.patient_id.clone(),
            record.sex.map(|s| s.to_string()).unwrap_or_default(),
            record.age.map(|a| a.to_string()).unwrap_or_default(),
            record.timestamp.map(|t| t.to_string()).unwrap_or_default(),
        ];
        for column in &test_columns {
            let cell = record
                .values
                .get(*column)
                .and_then(|v| *v)
                .map(|v| v.to_string())
                .unwrap_or_default();
            row.push(cell);
        }
        writer.write_record(&row).context("write csv row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}
