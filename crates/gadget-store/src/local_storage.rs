use std::sync::Arc;

use redb::{Database, ReadableTable};

use gadget_core::{LocalStorage, StorageError};

use crate::tables::LOCAL_STORAGE_TABLE;

/// redb implementation of LocalStorage.
pub struct RedbLocalStorage {
    db: Arc<Database>,
}

impl RedbLocalStorage {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Initialize the database tables.
    pub fn init_tables(db: &Database) -> Result<(), StorageError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let _ = write_txn
                .open_table(LOCAL_STORAGE_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }
}

impl LocalStorage for RedbLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let table = read_txn
            .open_table(LOCAL_STORAGE_TABLE)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let value = table
            .get(key)
            .map_err(|e| StorageError::Database(e.to_string()))?
            .map(|v| v.value().to_string());

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(LOCAL_STORAGE_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;

            table
                .insert(key, value)
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        tracing::debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadget_core::{FavoritesStore, FAVORITES_KEY};
    use tempfile::{tempdir, TempDir};

    fn create_test_db() -> (TempDir, Arc<Database>) {
        let dir = tempdir().unwrap();
        let db = Database::create(dir.path().join("test.redb")).unwrap();
        RedbLocalStorage::init_tables(&db).unwrap();
        (dir, Arc::new(db))
    }

    #[test]
    fn test_set_and_get_item() {
        let (_dir, db) = create_test_db();
        let storage = RedbLocalStorage::new(db);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();

        assert_eq!(storage.get_item("k").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let (_dir, db) = create_test_db();
        let storage = RedbLocalStorage::new(db);

        assert_eq!(storage.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_favorites_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local.redb");

        {
            let db = crate::init_database(&path).unwrap();
            let mut store = FavoritesStore::new(RedbLocalStorage::new(db));
            store.load();
            store.toggle("g-1");
            store.toggle("g-2");
            store.toggle("g-1");
        }

        let db = crate::init_database(&path).unwrap();
        assert_eq!(
            RedbLocalStorage::new(db.clone()).get_item(FAVORITES_KEY).unwrap(),
            Some(r#"["g-2"]"#.to_string())
        );

        let mut store = FavoritesStore::new(RedbLocalStorage::new(db));
        let favorites = store.load();
        assert_eq!(favorites.len(), 1);
        assert!(favorites.contains("g-2"));
    }

    #[test]
    fn test_corrupt_favorites_load_empty() {
        let (_dir, db) = create_test_db();
        let storage = RedbLocalStorage::new(db);
        storage.set_item(FAVORITES_KEY, r#"{"not": "a list"}"#).unwrap();

        let mut store = FavoritesStore::new(storage);
        assert!(store.load().is_empty());
    }
}
