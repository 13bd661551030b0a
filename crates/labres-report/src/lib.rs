//! Aggregated views over classified results.
//!
//! A pure view layer: category grouping, the abnormal-first list, chart
//! time series and snapshots, and the serializable run summary. Nothing
//! here mutates or re-derives classification decisions.

pub mod abnormal;
pub mod aggregate;
pub mod chart;
pub mod summary;

pub use abnormal::abnormal_results;
pub use aggregate::{category_counts, group_by_category, status_counts};
pub use chart::{ChartPoint, PatientChart, chart_data, status_palette};
pub use summary::{AbnormalEntry, PipelineSummary, summarize};
