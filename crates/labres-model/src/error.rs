use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
