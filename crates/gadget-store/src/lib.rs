//! Gadget Store - redb implementation of client-local storage.

pub mod local_storage;
pub mod memory;
pub mod tables;

pub use local_storage::RedbLocalStorage;
pub use memory::MemoryLocalStorage;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use gadget_core::{LocalStorage, StorageError};

/// Open (or create) a local storage database with all required tables.
///
/// Missing parent directories are created.
pub fn init_database(path: impl AsRef<Path>) -> Result<Arc<Database>, StorageError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }
    }

    let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

    RedbLocalStorage::init_tables(&db)?;

    Ok(Arc::new(db))
}

/// Client-local storage for one session: the database file, or memory when
/// the file cannot be opened.
pub enum ClientStorage {
    Redb(RedbLocalStorage),
    Memory(MemoryLocalStorage),
}

impl ClientStorage {
    /// Open the database at `path`. On failure, log a warning and fall back
    /// to memory so the session keeps working without persistence.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match init_database(path) {
            Ok(db) => ClientStorage::Redb(RedbLocalStorage::new(db)),
            Err(e) => {
                tracing::warn!(
                    "Failed to open local storage at {}: {}. Favorites will not be saved.",
                    path.display(),
                    e
                );
                ClientStorage::Memory(MemoryLocalStorage::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, ClientStorage::Redb(_))
    }
}

impl LocalStorage for ClientStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            ClientStorage::Redb(storage) => storage.get_item(key),
            ClientStorage::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            ClientStorage::Redb(storage) => storage.set_item(key, value),
            ClientStorage::Memory(storage) => storage.set_item(key, value),
        }
    }
}
