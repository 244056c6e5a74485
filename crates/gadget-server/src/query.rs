use serde::Deserialize;

use gadget_core::{CategoryFilter, FavoriteSet, FilterError, FilterState, PriceRange};

/// Catalog filter parameters shared by the page and the API.
///
/// Favorites are supplied by the client on every request as a
/// comma-separated id list; the server never stores them.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub favorites_only: bool,
    pub favorites: Option<String>,
}

impl CatalogQuery {
    pub fn category(&self) -> Result<CategoryFilter, FilterError> {
        match self.category.as_deref() {
            None | Some("") => Ok(CategoryFilter::All),
            Some(raw) => raw.parse(),
        }
    }

    /// Exact price range; missing bounds default to the selector limits.
    pub fn price_range(&self) -> Result<PriceRange, FilterError> {
        let defaults = PriceRange::default();
        PriceRange::new(
            self.min_price.unwrap_or(defaults.min()),
            self.max_price.unwrap_or(defaults.max()),
        )
    }

    /// Filter state with the price range taken verbatim.
    pub fn filter_state(&self) -> Result<FilterState, FilterError> {
        Ok(FilterState {
            category: self.category()?,
            price_range: self.price_range()?,
            favorites_only: self.favorites_only,
        })
    }

    /// Filter state with the price range snapped to selector positions.
    pub fn control_filter_state(&self) -> Result<FilterState, FilterError> {
        let defaults = PriceRange::default();
        Ok(FilterState {
            category: self.category()?,
            price_range: PriceRange::from_controls(
                self.min_price.unwrap_or(defaults.min()),
                self.max_price.unwrap_or(defaults.max()),
            ),
            favorites_only: self.favorites_only,
        })
    }

    pub fn favorite_set(&self) -> FavoriteSet {
        FavoriteSet::from_ids(
            self.favorites
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty()),
        )
    }
}
