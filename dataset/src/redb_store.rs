//! Redb-backed persistent dataset store.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use crate::error::{serialization, storage};
use crate::store::owner_prefix;
use crate::{Dataset, DatasetResult, DatasetStore, split_id};

const DATASETS: TableDefinition<&str, &[u8]> = TableDefinition::new("datasets");

/// A [`DatasetStore`] persisted in a redb database file.
///
/// Datasets are stored as JSON, one row per dataset. Every write runs in
/// its own transaction, so an update is either fully visible or not at all.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Opens or creates the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let db = Database::create(path).map_err(storage)?;

        let tx = db.begin_write().map_err(storage)?;
        {
            let _ = tx.open_table(DATASETS).map_err(storage)?;
        }
        tx.commit().map_err(storage)?;

        Ok(Self { db })
    }
}

fn encode(dataset: &Dataset) -> DatasetResult<Vec<u8>> {
    serde_json::to_vec(dataset).map_err(serialization)
}

fn decode(bytes: &[u8]) -> DatasetResult<Dataset> {
    serde_json::from_slice(bytes).map_err(serialization)
}

impl DatasetStore for RedbStore {
    fn get_dataset(&self, owner: &str, name: &str) -> DatasetResult<Option<Dataset>> {
        let tx = self.db.begin_read().map_err(storage)?;
        let table = tx.open_table(DATASETS).map_err(storage)?;
        let id = format!("{owner}/{name}");
        match table.get(id.as_str()).map_err(storage)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    fn get_datasets(&self, owner: &str) -> DatasetResult<Vec<Dataset>> {
        let tx = self.db.begin_read().map_err(storage)?;
        let table = tx.open_table(DATASETS).map_err(storage)?;
        let prefix = owner_prefix(owner);

        let mut out = Vec::new();
        for item in table.range(prefix.as_str()..).map_err(storage)? {
            let (key, value) = item.map_err(storage)?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            out.push(decode(value.value())?);
        }
        Ok(out)
    }

    fn add_dataset(&self, dataset: &Dataset) -> DatasetResult<bool> {
        let id = dataset.get_id();
        let bytes = encode(dataset)?;

        let tx = self.db.begin_write().map_err(storage)?;
        let added = {
            let mut table = tx.open_table(DATASETS).map_err(storage)?;
            let exists = table.get(id.as_str()).map_err(storage)?.is_some();
            if !exists {
                table.insert(id.as_str(), bytes.as_slice()).map_err(storage)?;
            }
            !exists
        };
        tx.commit().map_err(storage)?;
        Ok(added)
    }

    fn update_dataset(&self, id: &str, dataset: &Dataset) -> DatasetResult<bool> {
        split_id(id)?;
        let new_id = dataset.get_id();
        let bytes = encode(dataset)?;

        let tx = self.db.begin_write().map_err(storage)?;
        let updated = {
            let mut table = tx.open_table(DATASETS).map_err(storage)?;
            let existed = table.remove(id).map_err(storage)?.is_some();
            if existed {
                table.insert(new_id.as_str(), bytes.as_slice()).map_err(storage)?;
            }
            existed
        };
        if updated {
            tx.commit().map_err(storage)?;
        } else {
            tx.abort().map_err(storage)?;
        }
        Ok(updated)
    }

    fn delete_dataset(&self, id: &str) -> DatasetResult<bool> {
        split_id(id)?;
        let tx = self.db.begin_write().map_err(storage)?;
        let deleted = {
            let mut table = tx.open_table(DATASETS).map_err(storage)?;
            let removed = table.remove(id).map_err(storage)?.is_some();
            removed
        };
        tx.commit().map_err(storage)?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;
    use tempfile::tempdir;

    fn dataset(owner: &str, name: &str) -> Dataset {
        let mut ds = Dataset::new(owner, name);
        ds.vectors.push(Vector::new("a", vec![0.25, -1.5]));
        ds.vectors.push(Vector::new("empty", vec![]));
        ds
    }

    #[test]
    fn redb_add_get_update() {
        let dir = tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("test.redb")).unwrap();

        assert!(store.add_dataset(&dataset("admin", "ds1")).unwrap());
        assert!(!store.add_dataset(&dataset("admin", "ds1")).unwrap());

        let mut ds = store.get_dataset("admin", "ds1").unwrap().unwrap();
        assert_eq!(ds.vectors.len(), 2);
        assert_eq!(ds.vectors[0].data, vec![0.25, -1.5]);

        ds.vectors[0].category = "3".into();
        ds.vectors[0].color = "#a0b1c2".into();
        assert!(store.update_dataset("admin/ds1", &ds).unwrap());
        assert!(!store.update_dataset("admin/none", &ds).unwrap());

        let got = store.get_dataset("admin", "ds1").unwrap().unwrap();
        assert_eq!(got, ds);
    }

    #[test]
    fn redb_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.add_dataset(&dataset("admin", "ds1")).unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert!(store.get_dataset("admin", "ds1").unwrap().is_some());
    }

    #[test]
    fn redb_get_datasets_and_delete() {
        let dir = tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("test.redb")).unwrap();
        store.add_dataset(&dataset("admin", "b")).unwrap();
        store.add_dataset(&dataset("admin", "a")).unwrap();
        store.add_dataset(&dataset("adminx", "c")).unwrap();

        let names: Vec<String> = store
            .get_datasets("admin")
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(store.delete_dataset("admin/a").unwrap());
        assert!(!store.delete_dataset("admin/a").unwrap());
        assert_eq!(store.get_datasets("admin").unwrap().len(), 1);

        assert!(matches!(
            store.delete_dataset("admin"),
            Err(crate::DatasetError::InvalidId(_))
        ));
        assert!(matches!(
            store.update_dataset("b", &dataset("admin", "b")),
            Err(crate::DatasetError::InvalidId(_))
        ));
        assert_eq!(store.get_datasets("admin").unwrap().len(), 1);
    }
}
