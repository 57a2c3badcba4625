//! In-memory dataset store for testing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::storage;
use crate::store::owner_prefix;
use crate::{Dataset, DatasetResult, DatasetStore, split_id};

/// A [`DatasetStore`] backed by a map. Data is lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<BTreeMap<String, Dataset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `datasets`.
    pub fn with_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Self {
        let data = datasets.into_iter().map(|d| (d.get_id(), d)).collect();
        Self {
            data: Mutex::new(data),
        }
    }
}

impl DatasetStore for MemoryStore {
    fn get_dataset(&self, owner: &str, name: &str) -> DatasetResult<Option<Dataset>> {
        let data = self.data.lock().map_err(storage)?;
        Ok(data.get(&format!("{owner}/{name}")).cloned())
    }

    fn get_datasets(&self, owner: &str) -> DatasetResult<Vec<Dataset>> {
        let data = self.data.lock().map_err(storage)?;
        let prefix = owner_prefix(owner);
        Ok(data
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn add_dataset(&self, dataset: &Dataset) -> DatasetResult<bool> {
        let mut data = self.data.lock().map_err(storage)?;
        let id = dataset.get_id();
        if data.contains_key(&id) {
            return Ok(false);
        }
        data.insert(id, dataset.clone());
        Ok(true)
    }

    fn update_dataset(&self, id: &str, dataset: &Dataset) -> DatasetResult<bool> {
        split_id(id)?;
        let mut data = self.data.lock().map_err(storage)?;
        if data.remove(id).is_none() {
            return Ok(false);
        }
        data.insert(dataset.get_id(), dataset.clone());
        Ok(true)
    }

    fn delete_dataset(&self, id: &str) -> DatasetResult<bool> {
        split_id(id)?;
        let mut data = self.data.lock().map_err(storage)?;
        Ok(data.remove(id).is_some())
    }
}
