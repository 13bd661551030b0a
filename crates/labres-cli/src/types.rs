//! Result types shared by commands and summary printing.

use std::path::PathBuf;

use crate::pipeline::PipelineOutcome;

/// Artifact paths written by a process run.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub cleaned_csv: Option<PathBuf>,
    pub classified_json: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub charts_json: Option<PathBuf>,
}

/// Everything `labres process` produced, for the final summary.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub input: PathBuf,
    pub rows_ingested: usize,
    pub outcome: PipelineOutcome,
    pub outputs: OutputPaths,
}
