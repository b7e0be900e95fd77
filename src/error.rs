use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SignalError {
    #[error("Cannot read file {path}: {reason}")]
    FileUnreadable { path: PathBuf, reason: String },

    #[error("Index {index} out of bounds for collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Validation accuracy requested over an empty test set")]
    EmptyTestSet,

    #[error("Malformed line {line} in {path}: {reason}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<csv::Error> for SignalError {
    fn from(err: csv::Error) -> Self {
        SignalError::Csv(err.to_string())
    }
}

impl From<config::ConfigError> for SignalError {
    fn from(err: config::ConfigError) -> Self {
        SignalError::Config(err.to_string())
    }
}

impl SignalError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SignalError::FileUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SignalError>;

/// Bounds-checked slice access shared by the factory, model and classifier getters.
pub fn checked_get<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or(SignalError::IndexOutOfRange {
        index,
        len: items.len(),
    })
}
