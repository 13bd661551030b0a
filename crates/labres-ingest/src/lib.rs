//! Boundary readers that turn uploaded tables into raw record batches.
//!
//! This crate is the file-format collaborator of the core: it resolves
//! column naming and produces the normalized record shape, and nothing
//! downstream touches files again. Structural failures (unreadable file,
//! unusable document shape) are errors; data-quality problems are not —
//! they flow through as raw strings for the cleaning stage to count.

pub mod columns;
pub mod csv_records;
pub mod error;
pub mod json_records;

pub use csv_records::{read_csv_file, read_csv_records};
pub use error::{IngestError, Result};
pub use json_records::{read_json_file, read_json_records};

use std::path::Path;

use labres_model::RawRecord;

/// Read a table by file extension (`.csv` or `.json`).
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "csv" => read_csv_file(path),
        "json" => read_json_file(path),
        other => Err(IngestError::UnsupportedFormat(other.to_string())),
    }
}
