//! CLI argument definitions for the labres processor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labres",
    version,
    about = "Laboratory results processor - canonicalize, clean, and classify lab tables",
    long_about = "Process heterogeneous laboratory-result tables into a cleaned,\n\
                  canonically-identified, clinically-annotated dataset.\n\
                  Supports CSV and JSON inputs; reference data comes from the\n\
                  standards directory (catalog.json, reference_ranges.csv)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (patient data) in trace logs.
    ///
    /// Off by default: measured values are personal health information and
    /// are redacted from log output unless explicitly enabled.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a laboratory table end to end.
    Process(ProcessArgs),

    /// List the canonical test catalog.
    Tests,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Input table (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output directory for cleaned/classified artifacts
    /// (default: alongside the input, in <FILE-stem>-out).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Standards directory holding catalog.json and reference_ranges.csv
    /// (default: LABRES_STANDARDS_DIR or the workspace standards/).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,

    /// Similarity threshold for name clustering and catalog mapping.
    #[arg(long = "threshold", default_value_t = labres_model::DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    /// Severity margin for the significantly-abnormal flag.
    #[arg(long = "margin", default_value_t = labres_model::DEFAULT_SIGNIFICANCE_MARGIN)]
    pub margin: f64,

    /// Keep records whose every value is empty or non-numeric.
    #[arg(long = "keep-empty")]
    pub keep_empty: bool,

    /// Keep exact duplicate records.
    #[arg(long = "keep-duplicates")]
    pub keep_duplicates: bool,

    /// Skip 3-sigma outlier screening.
    #[arg(long = "keep-outliers")]
    pub keep_outliers: bool,

    /// Analyze and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
