use casvec_dataset::DatasetError;
use casvec_kmeans::PartitionError;
use thiserror::Error;

/// Errors returned by labeling operations.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("labeler: dataset {owner}/{name} not found")]
    DatasetNotFound { owner: String, name: String },

    #[error("labeler: no vector with data to cluster")]
    EmptyInput,

    #[error("labeler: invalid config: {0}")]
    InvalidConfig(String),

    #[error("labeler: vectors {first} and {second} share data key {key}")]
    KeyCollision {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("labeler: cluster member does not map back to a vector: {0}")]
    Consistency(String),

    #[error("labeler: partition failed: {0}")]
    Partition(#[from] PartitionError),

    #[error("labeler: store error: {0}")]
    Store(#[from] DatasetError),
}

/// Broad failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or setup: missing dataset, nothing to cluster, bad config.
    Configuration,
    /// Partition output could not be mapped back to the input vectors.
    Consistency,
    /// The clustering algorithm could not run on the input.
    Partitioning,
    /// Loading or saving the dataset failed.
    Storage,
}

impl LabelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::DatasetNotFound { .. }
            | LabelError::EmptyInput
            | LabelError::InvalidConfig(_) => ErrorKind::Configuration,
            LabelError::KeyCollision { .. } | LabelError::Consistency(_) => {
                ErrorKind::Consistency
            }
            LabelError::Partition(PartitionError::NonFinite { .. } | PartitionError::ZeroClusters) => {
                ErrorKind::Configuration
            }
            LabelError::Partition(_) => ErrorKind::Partitioning,
            LabelError::Store(_) => ErrorKind::Storage,
        }
    }
}
