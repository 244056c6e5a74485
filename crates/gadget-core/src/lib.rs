//! Gadget Core - Catalog model, favorites, and filtering.
//!
//! This crate holds the domain logic of the gadget catalog: the record
//! shape and its schema validation, the favorites store over client-local
//! storage, the pure filter engine, and the session controller that ties
//! them together. It has no dependencies on other gadget crates.

pub mod display;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod gadget;
pub mod session;
pub mod storage;
pub mod validation;

// Re-exports for convenience
pub use error::{FilterError, StorageError, ValidationError};
pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};
pub use filter::{
    compute_visible, visible_indices, CategoryFilter, FilterState, PriceRange, PRICE_CEILING,
    PRICE_STEP,
};
pub use gadget::{Category, GadgetDataset, GadgetRecord};
pub use session::CatalogSession;
pub use storage::LocalStorage;
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryStorage;
