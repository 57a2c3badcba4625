use std::fmt;

use crate::{Dataset, DatasetResult};

/// Persists datasets keyed by `"owner/name"`.
///
/// Methods taking an `id` fail with
/// [`DatasetError::InvalidId`](crate::DatasetError::InvalidId) when it is
/// not of that form.
///
/// Implementations must be safe for concurrent use. Writes overwrite the
/// whole dataset; callers serialize updates to the same dataset.
pub trait DatasetStore: Send + Sync {
    /// Returns the dataset, or `None` if it does not exist.
    fn get_dataset(&self, owner: &str, name: &str) -> DatasetResult<Option<Dataset>>;

    /// Returns all datasets of `owner`, sorted by name.
    fn get_datasets(&self, owner: &str) -> DatasetResult<Vec<Dataset>>;

    /// Inserts a new dataset. Returns false if its id is already taken.
    fn add_dataset(&self, dataset: &Dataset) -> DatasetResult<bool>;

    /// Replaces the dataset stored under `id`. Returns false if `id` is
    /// unknown. When `dataset.get_id()` differs from `id` the record moves.
    fn update_dataset(&self, id: &str, dataset: &Dataset) -> DatasetResult<bool>;

    /// Removes the dataset. Returns false if `id` is unknown.
    fn delete_dataset(&self, id: &str) -> DatasetResult<bool>;
}

impl fmt::Debug for dyn DatasetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetStore {{ ... }}")
    }
}

/// Prefix shared by every dataset id of `owner`.
pub(crate) fn owner_prefix(owner: &str) -> String {
    format!("{owner}/")
}
