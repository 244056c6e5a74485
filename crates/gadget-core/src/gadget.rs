use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Product category of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mobile,
    #[serde(rename = "PC")]
    Pc,
    Wearable,
    Audio,
    #[serde(rename = "Smart Home", alias = "SmartHome")]
    SmartHome,
}

impl Category {
    /// All categories in the order the category selector shows them.
    pub const ALL: [Category; 5] = [
        Category::Mobile,
        Category::Pc,
        Category::Wearable,
        Category::Audio,
        Category::SmartHome,
    ];

    /// Wire name, as it appears in the dataset document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile",
            Category::Pc => "PC",
            Category::Wearable => "Wearable",
            Category::Audio => "Audio",
            Category::SmartHome => "Smart Home",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mobile" => Ok(Category::Mobile),
            "PC" => Ok(Category::Pc),
            "Wearable" => Ok(Category::Wearable),
            "Audio" => Ok(Category::Audio),
            "Smart Home" | "SmartHome" => Ok(Category::SmartHome),
            other => Err(FilterError::UnknownCategory(other.to_string())),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GadgetRecord {
    /// Stable identifier, used as the favorites key.
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Unknown when `None`; such records are never excluded by price.
    #[serde(default)]
    pub price: Option<f64>,
    pub price_text: String,
    pub category: Category,
    pub image_url: String,
    pub source_url: String,
    pub source_name: String,
    pub published_at: String,
    #[serde(default)]
    pub is_trending: bool,
}

/// The full ordered catalog plus its last-updated marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GadgetDataset {
    pub gadgets: Vec<GadgetRecord>,
    #[serde(default)]
    pub last_updated: String,
}

impl GadgetDataset {
    pub fn new(gadgets: Vec<GadgetRecord>, last_updated: impl Into<String>) -> Self {
        Self {
            gadgets,
            last_updated: last_updated.into(),
        }
    }

    /// Look up a record by id.
    pub fn find(&self, id: &str) -> Option<&GadgetRecord> {
        self.gadgets.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.gadgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gadgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::SmartHome).unwrap(),
            r#""Smart Home""#
        );
        assert_eq!(serde_json::to_string(&Category::Pc).unwrap(), r#""PC""#);

        let parsed: Category = serde_json::from_str(r#""SmartHome""#).unwrap();
        assert_eq!(parsed, Category::SmartHome);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("PC".parse::<Category>().unwrap(), Category::Pc);
        assert_eq!("Smart Home".parse::<Category>().unwrap(), Category::SmartHome);
        assert_eq!(
            "Tablet".parse::<Category>(),
            Err(FilterError::UnknownCategory("Tablet".to_string()))
        );
    }

    #[test]
    fn test_record_deserialize_camel_case() {
        let record: GadgetRecord = serde_json::from_str(
            r#"{
                "id": "g-1",
                "title": "Phone",
                "summary": "A phone",
                "price": null,
                "priceText": "価格未定",
                "category": "Mobile",
                "imageUrl": "https://example.com/p.jpg",
                "sourceUrl": "https://example.com/p",
                "sourceName": "Example",
                "publishedAt": "2025-01-01T00:00:00Z",
                "isTrending": true
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, "g-1");
        assert_eq!(record.price, None);
        assert_eq!(record.price_text, "価格未定");
        assert!(record.is_trending);
    }

    #[test]
    fn test_dataset_find() {
        let dataset = GadgetDataset::new(Vec::new(), "2025-01-01T00:00:00Z");
        assert!(dataset.find("missing").is_none());
        assert!(dataset.is_empty());
    }
}
