//! Gadget Provider - Dataset loading with fallback to the bundled default.

pub mod provider;
pub mod source;

pub use provider::{bundled_default, DataProvider, BUNDLED_DATASET};
pub use source::{
    DatasetSource, FetchError, FileDatasetSource, HttpDatasetSource, SourceLocation,
};
