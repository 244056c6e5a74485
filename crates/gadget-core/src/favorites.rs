use std::collections::HashSet;

use crate::storage::LocalStorage;

/// Local storage key holding the favorites as a JSON array of ids.
pub const FAVORITES_KEY: &str = "gadget-favorites";

/// Set of favorited gadget ids.
///
/// Keeps the order in which ids were added so that the persisted array
/// stays stable between writes. Equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<String>,
    index: HashSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ids, dropping duplicates.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id.into());
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Remove `id` if present, add it otherwise.
    /// Returns true if `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.index.remove(id) {
            self.ids.retain(|fid| fid != id);
            false
        } else {
            self.insert(id.to_string());
            true
        }
    }

    fn insert(&mut self, id: String) {
        if self.index.insert(id.clone()) {
            self.ids.push(id);
        }
    }
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for FavoriteSet {}

/// Durable favorites, loaded once per session from client-local storage.
pub struct FavoritesStore<S: LocalStorage> {
    storage: S,
    favorites: FavoriteSet,
    loaded: bool,
    in_memory_only: bool,
}

impl<S: LocalStorage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            favorites: FavoriteSet::new(),
            loaded: false,
            in_memory_only: false,
        }
    }

    /// Read the persisted set. Absent or malformed data yields an empty set.
    ///
    /// Only the first call reads storage; later calls return the in-memory set.
    pub fn load(&mut self) -> &FavoriteSet {
        if self.loaded {
            return &self.favorites;
        }

        self.favorites = match self.storage.get_item(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => FavoriteSet::from_ids(ids),
                Err(e) => {
                    tracing::warn!("Ignoring malformed favorites in local storage: {}", e);
                    FavoriteSet::new()
                }
            },
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites from local storage: {}", e);
                FavoriteSet::new()
            }
        };
        self.loaded = true;

        tracing::debug!("Loaded {} favorites", self.favorites.len());
        &self.favorites
    }

    /// True once `load` has completed, even if the set is empty.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// False after a write failure; favorites then live in memory only.
    pub fn is_persistent(&self) -> bool {
        !self.in_memory_only
    }

    /// Add or remove `id`, then persist. Loads first if needed.
    pub fn toggle(&mut self, id: &str) -> &FavoriteSet {
        if !self.loaded {
            self.load();
        }
        self.favorites.toggle(id);
        self.persist();
        &self.favorites
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Write the whole set to storage, overwriting prior content.
    ///
    /// A failed write is logged and switches the store to in-memory-only
    /// for the rest of the session.
    pub fn persist(&mut self) {
        if !self.loaded || self.in_memory_only {
            return;
        }

        let raw = match serde_json::to_string(self.favorites.ids()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set_item(FAVORITES_KEY, &raw) {
            tracing::warn!(
                "Failed to persist favorites, keeping them in memory only: {}",
                e
            );
            self.in_memory_only = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_favorite_set_toggle() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle("a"));
        assert!(set.toggle("b"));
        assert!(!set.toggle("a"));

        assert_eq!(set.ids(), &["b".to_string()]);
        assert!(!set.contains("a"));
        assert!(set.contains("b"));
    }

    #[test]
    fn test_favorite_set_dedupes_and_ignores_order() {
        let a = FavoriteSet::from_ids(["x", "y", "x"]);
        let b = FavoriteSet::from_ids(["y", "x"]);

        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_absent_is_empty_and_loaded() {
        let mut store = FavoritesStore::new(InMemoryStorage::new());
        assert!(!store.is_loaded());

        assert!(store.load().is_empty());
        assert!(store.is_loaded());
    }

    #[test]
    fn test_load_existing() {
        let storage = InMemoryStorage::with_item(FAVORITES_KEY, r#"["a","b","a"]"#);
        let mut store = FavoritesStore::new(storage);

        let favorites = store.load();
        assert_eq!(favorites.len(), 2);
        assert!(store.contains("a"));
        assert!(store.contains("b"));
    }

    #[test]
    fn test_load_malformed_payloads() {
        for raw in [r#"{"a": true}"#, "not json", r#"[1, 2]"#, r#""a""#, "null"] {
            let mut store = FavoritesStore::new(InMemoryStorage::with_item(FAVORITES_KEY, raw));
            assert!(store.load().is_empty(), "payload {} should load empty", raw);
            assert!(store.is_loaded());
        }
    }

    #[test]
    fn test_toggle_persists_each_call() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut store = FavoritesStore::new(storage.clone());
        store.load();

        store.toggle("a");
        assert_eq!(storage.raw(FAVORITES_KEY), Some(r#"["a"]"#.to_string()));

        store.toggle("b");
        assert_eq!(storage.raw(FAVORITES_KEY), Some(r#"["a","b"]"#.to_string()));
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_double_toggle_is_noop_on_membership() {
        let storage = Arc::new(InMemoryStorage::with_item(FAVORITES_KEY, r#"["keep"]"#));
        let mut store = FavoritesStore::new(storage.clone());
        store.load();

        for id in ["keep", "new"] {
            let before = store.contains(id);
            store.toggle(id);
            store.toggle(id);
            assert_eq!(store.contains(id), before);
        }

        assert_eq!(storage.write_count(), 4);
        assert_eq!(store.favorites(), &FavoriteSet::from_ids(["keep"]));
    }

    #[test]
    fn test_toggle_before_load_keeps_persisted() {
        let storage = Arc::new(InMemoryStorage::with_item(FAVORITES_KEY, r#"["old"]"#));
        let mut store = FavoritesStore::new(storage.clone());

        store.toggle("new");

        assert!(store.is_loaded());
        assert!(store.contains("old"));
        assert!(store.contains("new"));
        assert_eq!(
            storage.raw(FAVORITES_KEY),
            Some(r#"["old","new"]"#.to_string())
        );
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut store = FavoritesStore::new(storage.clone());
        store.load();
        storage.fail_writes(true);

        store.toggle("a");
        assert!(store.contains("a"));
        assert!(!store.is_persistent());

        // Storage recovers, but the session stays in memory only.
        storage.fail_writes(false);
        store.toggle("b");
        assert!(store.contains("b"));
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.raw(FAVORITES_KEY), None);
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        let storage = Arc::new(InMemoryStorage::with_item(FAVORITES_KEY, r#"["a"]"#));
        storage.fail_reads(true);
        let mut store = FavoritesStore::new(storage.clone());

        assert!(store.load().is_empty());
        assert!(store.is_loaded());
        assert!(!store.contains("a"));

        // Reads are not retried once loaded.
        storage.fail_reads(false);
        assert!(store.load().is_empty());
        assert!(store.is_persistent());
    }

    #[test]
    fn test_persist_before_load_is_skipped() {
        let storage = Arc::new(InMemoryStorage::with_item(FAVORITES_KEY, r#"["a"]"#));
        let mut store = FavoritesStore::new(storage.clone());

        store.persist();
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.raw(FAVORITES_KEY), Some(r#"["a"]"#.to_string()));
    }
}
