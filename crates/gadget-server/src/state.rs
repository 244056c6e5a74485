use std::sync::Arc;

use gadget_core::GadgetDataset;

/// Application state shared across handlers.
///
/// The dataset is loaded once at startup and is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<GadgetDataset>,
}

impl AppState {
    pub fn new(dataset: GadgetDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}
