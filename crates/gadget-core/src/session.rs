use crate::favorites::{FavoriteSet, FavoritesStore};
use crate::filter::{visible_indices, CategoryFilter, FilterState, PriceRange};
use crate::gadget::{GadgetDataset, GadgetRecord};
use crate::storage::LocalStorage;

/// Session controller: owns the loaded dataset, the filter state and the
/// favorites store, and recomputes the visible subset after every change.
pub struct CatalogSession<S: LocalStorage> {
    dataset: GadgetDataset,
    filter: FilterState,
    favorites: FavoritesStore<S>,
    visible: Vec<usize>,
}

impl<S: LocalStorage> CatalogSession<S> {
    /// Start a session with default filters. Loads favorites if needed.
    pub fn new(dataset: GadgetDataset, favorites: FavoritesStore<S>) -> Self {
        Self::with_filter(dataset, favorites, FilterState::default())
    }

    pub fn with_filter(
        dataset: GadgetDataset,
        mut favorites: FavoritesStore<S>,
        filter: FilterState,
    ) -> Self {
        favorites.load();
        let mut session = Self {
            dataset,
            filter,
            favorites,
            visible: Vec::new(),
        };
        session.recompute();
        session
    }

    /// True once favorites are authoritative.
    pub fn is_ready(&self) -> bool {
        self.favorites.is_loaded()
    }

    pub fn dataset(&self) -> &GadgetDataset {
        &self.dataset
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.favorites().len()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Visible records in dataset order.
    pub fn visible(&self) -> Vec<&GadgetRecord> {
        self.visible
            .iter()
            .map(|&i| &self.dataset.gadgets[i])
            .collect()
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.filter.category != category {
            self.filter.category = category;
            self.recompute();
        }
    }

    pub fn set_price_range(&mut self, price_range: PriceRange) {
        if self.filter.price_range != price_range {
            self.filter.price_range = price_range;
            self.recompute();
        }
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        if self.filter.favorites_only != favorites_only {
            self.filter.favorites_only = favorites_only;
            self.recompute();
        }
    }

    /// Toggle `id` in the favorites store. Returns true if it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = self.favorites.toggle(id).contains(id);
        self.recompute();
        now_favorite
    }

    fn recompute(&mut self) {
        self.visible = visible_indices(
            &self.dataset.gadgets,
            &self.filter,
            self.favorites.favorites(),
        );
        tracing::debug!(
            "Recomputed visible set: {} of {} gadgets",
            self.visible.len(),
            self.dataset.gadgets.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FAVORITES_KEY;
    use crate::gadget::Category;
    use crate::storage::memory::InMemoryStorage;
    use std::sync::Arc;

    fn gadget(id: &str, category: Category, price: Option<f64>) -> GadgetRecord {
        GadgetRecord {
            id: id.to_string(),
            title: id.to_string(),
            summary: String::new(),
            price,
            price_text: String::new(),
            category,
            image_url: String::new(),
            source_url: String::new(),
            source_name: String::new(),
            published_at: String::new(),
            is_trending: false,
        }
    }

    fn dataset() -> GadgetDataset {
        GadgetDataset::new(
            vec![
                gadget("A", Category::Mobile, Some(1000.0)),
                gadget("B", Category::Pc, None),
                gadget("C", Category::Mobile, Some(50000.0)),
            ],
            "2025-01-01T00:00:00Z",
        )
    }

    fn visible_ids<S: LocalStorage>(session: &CatalogSession<S>) -> Vec<&str> {
        session.visible().iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn test_new_session_loads_favorites() {
        let storage = InMemoryStorage::with_item(FAVORITES_KEY, r#"["C"]"#);
        let session = CatalogSession::new(dataset(), FavoritesStore::new(storage));

        assert!(session.is_ready());
        assert!(session.is_favorite("C"));
        assert_eq!(session.favorites_count(), 1);
        assert_eq!(visible_ids(&session), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_changes_recompute() {
        let mut session =
            CatalogSession::new(dataset(), FavoritesStore::new(InMemoryStorage::new()));

        session.set_category(CategoryFilter::Only(Category::Mobile));
        assert_eq!(visible_ids(&session), vec!["A", "C"]);

        session.set_price_range(PriceRange::new(0.0, 2000.0).unwrap());
        assert_eq!(visible_ids(&session), vec!["A"]);

        session.set_category(CategoryFilter::All);
        assert_eq!(visible_ids(&session), vec!["A", "B"]);
        assert_eq!(session.visible().len(), 2);
    }

    #[test]
    fn test_toggle_recomputes_favorites_view() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut session = CatalogSession::new(dataset(), FavoritesStore::new(storage.clone()));

        session.set_favorites_only(true);
        assert!(session.visible().is_empty());

        assert!(session.toggle_favorite("B"));
        assert_eq!(visible_ids(&session), vec!["B"]);
        assert_eq!(storage.raw(FAVORITES_KEY), Some(r#"["B"]"#.to_string()));

        assert!(!session.toggle_favorite("B"));
        assert!(session.visible().is_empty());
    }

    #[test]
    fn test_unchanged_setter_keeps_visible() {
        let mut session =
            CatalogSession::new(dataset(), FavoritesStore::new(InMemoryStorage::new()));
        let before = session.visible.as_ptr();

        session.set_category(CategoryFilter::All);
        session.set_price_range(PriceRange::default());
        session.set_favorites_only(false);

        assert_eq!(session.visible.as_ptr(), before);
    }

    #[test]
    fn test_with_filter() {
        let filter = FilterState {
            category: CategoryFilter::All,
            price_range: PriceRange::new(0.0, 300000.0).unwrap(),
            favorites_only: true,
        };
        let storage = InMemoryStorage::with_item(FAVORITES_KEY, r#"["B"]"#);
        let session = CatalogSession::with_filter(dataset(), FavoritesStore::new(storage), filter);

        assert_eq!(visible_ids(&session), vec!["B"]);
        assert_eq!(session.filter_state(), &filter);
    }
}
