use std::sync::Arc;

use crate::error::StorageError;

/// Durable client-local key/value storage holding string values.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory storage for testing. Writes can be made to fail.
    #[derive(Default)]
    pub struct InMemoryStorage {
        items: RwLock<HashMap<String, String>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    impl InMemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        /// Create storage pre-populated with one entry.
        pub fn with_item(key: &str, value: &str) -> Self {
            let storage = Self::new();
            storage
                .items
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            storage
        }

        /// Make every subsequent read fail with `Unavailable`.
        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Make every subsequent write fail with `QuotaExceeded`.
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Number of successful writes so far.
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Raw stored value, bypassing the trait.
        pub fn raw(&self, key: &str) -> Option<String> {
            self.items.read().unwrap().get(key).cloned()
        }
    }

    impl LocalStorage for InMemoryStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("read refused".to_string()));
            }
            Ok(self.items.read().unwrap().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::QuotaExceeded);
            }
            self.items
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

}
