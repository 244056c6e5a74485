use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Dataset document must be a JSON object")]
    NotAnObject,

    #[error("Dataset document has no `gadgets` field")]
    MissingGadgets,

    #[error("Dataset field `gadgets` must be an array")]
    GadgetsNotArray,

    #[error("Dataset field `lastUpdated` must be a string")]
    InvalidLastUpdated,

    #[error("Invalid gadget at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Gadget at index {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate gadget id: {0}")]
    DuplicateId(String),

    #[error("Invalid price {price} for gadget {id}: must be a non-negative number")]
    InvalidPrice { id: String, price: f64 },
}

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid price bound {0}: must be a non-negative number")]
    InvalidPriceBound(f64),

    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvertedPriceRange { min: f64, max: f64 },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Database error: {0}")]
    Database(String),
}
