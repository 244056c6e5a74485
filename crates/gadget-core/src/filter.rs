use serde::{Deserialize, Serialize, Serializer};

use crate::error::FilterError;
use crate::favorites::FavoriteSet;
use crate::gadget::{Category, GadgetRecord};

/// Upper bound of the price selector.
pub const PRICE_CEILING: f64 = 300_000.0;

/// Quantization step of the price selector.
pub const PRICE_STEP: f64 = 5_000.0;

/// Category selection: everything, or one exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// The six selector values, `All` first.
    pub const VALUES: [CategoryFilter; 6] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Mobile),
        CategoryFilter::Only(Category::Pc),
        CategoryFilter::Only(Category::Wearable),
        CategoryFilter::Only(Category::Audio),
        CategoryFilter::Only(Category::SmartHome),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" | "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive price range with `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, FilterError> {
        for bound in [min, max] {
            if bound.is_nan() || bound < 0.0 {
                return Err(FilterError::InvalidPriceBound(bound));
            }
        }
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `[0, ∞)`: excludes no priced record.
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Build a range from raw selector positions.
    ///
    /// Bounds are clamped to `[0, PRICE_CEILING]`, snapped to `PRICE_STEP`,
    /// and swapped if given in the wrong order.
    pub fn from_controls(min: f64, max: f64) -> Self {
        let snap = |v: f64| {
            let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, PRICE_CEILING) };
            ((v / PRICE_STEP).round() * PRICE_STEP).min(PRICE_CEILING)
        };
        let (a, b) = (snap(min), snap(max));
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: PRICE_CEILING,
        }
    }
}

/// Current user-chosen filter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub favorites_only: bool,
}

impl FilterState {
    /// A state that lets every record through.
    pub fn pass_all() -> Self {
        Self {
            category: CategoryFilter::All,
            price_range: PriceRange::unbounded(),
            favorites_only: false,
        }
    }

    /// Check one record against all three predicates.
    pub fn matches(&self, record: &GadgetRecord, favorites: &FavoriteSet) -> bool {
        if !self.category.matches(record.category) {
            return false;
        }
        if let Some(price) = record.price {
            if !self.price_range.contains(price) {
                return false;
            }
        }
        if self.favorites_only && !favorites.contains(&record.id) {
            return false;
        }
        true
    }
}

/// Visible subset of `gadgets`, in dataset order.
pub fn compute_visible<'a>(
    gadgets: &'a [GadgetRecord],
    state: &FilterState,
    favorites: &FavoriteSet,
) -> Vec<&'a GadgetRecord> {
    gadgets
        .iter()
        .filter(|g| state.matches(g, favorites))
        .collect()
}

/// Positions in `gadgets` of the visible subset, ascending.
pub fn visible_indices(
    gadgets: &[GadgetRecord],
    state: &FilterState,
    favorites: &FavoriteSet,
) -> Vec<usize> {
    gadgets
        .iter()
        .enumerate()
        .filter(|(_, g)| state.matches(g, favorites))
        .map(|(i, _)| i)
        .collect()
}
