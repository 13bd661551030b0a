use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {message}")]
    Csv { message: String },

    #[error("failed to parse JSON: {message}")]
    Json { message: String },

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
