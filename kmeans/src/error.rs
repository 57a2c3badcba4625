use thiserror::Error;

/// Errors returned by [`crate::KMeans::partition`].
#[derive(Debug, Error, PartialEq)]
pub enum PartitionError {
    #[error("kmeans: no observations to partition")]
    EmptyInput,

    #[error("kmeans: cluster count must be positive")]
    ZeroClusters,

    #[error("kmeans: need at least {k} observations, got {n}")]
    TooFewObservations { k: usize, n: usize },

    #[error("kmeans: observation {index} has no coordinates")]
    EmptyObservation { index: usize },

    #[error("kmeans: dimension mismatch at observation {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("kmeans: observation {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}
