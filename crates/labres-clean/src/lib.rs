//! Statistical cleaning of ingested laboratory batches.
//!
//! Removes empty and duplicate records, nulls 3-sigma outliers per test
//! column, and reports every count. The input batch is never mutated; every
//! pass produces new output.

pub mod clean;
pub mod dedupe;
pub mod outliers;
pub mod stats;

pub use clean::{CleanOutcome, clean};
pub use dedupe::{is_empty_record, remove_duplicates, remove_empty};
pub use outliers::null_outliers;
pub use stats::ColumnStats;
