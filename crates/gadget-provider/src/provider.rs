use gadget_core::{GadgetDataset, Validator};

use crate::source::{DatasetSource, FetchError};

/// Dataset shipped with the binary, used whenever the source fails.
pub const BUNDLED_DATASET: &str = include_str!("../data/default_gadgets.json");

/// Parse the bundled dataset.
pub fn bundled_default() -> GadgetDataset {
    match Validator::parse_dataset(BUNDLED_DATASET) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("Bundled dataset is invalid: {}", e);
            GadgetDataset::default()
        }
    }
}

/// Loads the session dataset once, falling back to the bundled default.
pub struct DataProvider<S: DatasetSource> {
    source: S,
}

impl<S: DatasetSource> DataProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and validate the dataset from the source.
    pub async fn try_fetch(&self) -> Result<GadgetDataset, FetchError> {
        let raw = self.source.fetch_document().await?;
        let dataset = Validator::parse_dataset(&raw)?;
        Ok(dataset)
    }

    /// Fetch the dataset; any failure yields the bundled default instead.
    pub async fn fetch_dataset(&self) -> GadgetDataset {
        match self.try_fetch().await {
            Ok(dataset) => {
                tracing::info!(
                    "Loaded {} gadgets from {}",
                    dataset.len(),
                    self.source.describe()
                );
                dataset
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load dataset from {}: {}. Using bundled data.",
                    self.source.describe(),
                    e
                );
                bundled_default()
            }
        }
    }
}
