use std::collections::HashSet;

use serde_json::Value;

use crate::error::ValidationError;
use crate::gadget::{GadgetDataset, GadgetRecord};

/// Schema validation for dataset documents.
pub struct Validator;

impl Validator {
    /// Validate an optional price.
    /// If present, must be finite and non-negative.
    pub fn validate_price(record: &GadgetRecord) -> Result<(), ValidationError> {
        if let Some(price) = record.price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::InvalidPrice {
                    id: record.id.clone(),
                    price,
                });
            }
        }
        Ok(())
    }

    /// Validate a single record at its position in the dataset.
    pub fn validate_record(index: usize, record: &GadgetRecord) -> Result<(), ValidationError> {
        if record.id.trim().is_empty() {
            return Err(ValidationError::EmptyId(index));
        }
        Self::validate_price(record)?;
        Ok(())
    }

    /// Validate every record and check that ids are unique.
    pub fn validate_dataset(dataset: &GadgetDataset) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(dataset.gadgets.len());
        for (index, record) in dataset.gadgets.iter().enumerate() {
            Self::validate_record(index, record)?;
            if !seen.insert(record.id.as_str()) {
                return Err(ValidationError::DuplicateId(record.id.clone()));
            }
        }
        Ok(())
    }

    /// Parse a dataset document, checking its shape before building typed records.
    pub fn parse_dataset(raw: &str) -> Result<GadgetDataset, ValidationError> {
        let document: Value =
            serde_json::from_str(raw).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
        Self::dataset_from_value(document)
    }

    /// Build a dataset from an already parsed JSON document.
    pub fn dataset_from_value(document: Value) -> Result<GadgetDataset, ValidationError> {
        let Value::Object(mut fields) = document else {
            return Err(ValidationError::NotAnObject);
        };

        let entries = match fields.remove("gadgets") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(ValidationError::GadgetsNotArray),
            None => return Err(ValidationError::MissingGadgets),
        };

        let last_updated = match fields.remove("lastUpdated") {
            Some(Value::String(s)) => s,
            None | Some(Value::Null) => String::new(),
            Some(_) => return Err(ValidationError::InvalidLastUpdated),
        };

        let gadgets = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<GadgetRecord>(entry).map_err(|e| {
                    ValidationError::InvalidRecord {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let dataset = GadgetDataset::new(gadgets, last_updated);
        Self::validate_dataset(&dataset)?;
        Ok(dataset)
    }
}
