use thiserror::Error;

/// Errors returned by dataset stores and loaders.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset: storage error: {0}")]
    Storage(String),

    #[error("dataset: serialization error: {0}")]
    Serialization(String),

    #[error("dataset: invalid id {0:?}, want \"owner/name\"")]
    InvalidId(String),

    #[error("dataset: {path}:{line}: {reason}")]
    Load {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("dataset: io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset: csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

pub(crate) fn storage<E: std::fmt::Display>(e: E) -> DatasetError {
    DatasetError::Storage(e.to_string())
}

pub(crate) fn serialization<E: std::fmt::Display>(e: E) -> DatasetError {
    DatasetError::Serialization(e.to_string())
}
