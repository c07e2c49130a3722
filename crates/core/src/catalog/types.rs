//! Catalog item type.
//!
//! The serde names mirror the spreadsheet column headers that the sheet
//! sync tooling reads and writes, so the catalog file stays a drop-in
//! exchange format between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Timestamp format used in the `Last Scrape` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One tracked entity: a named item with a target URL and the last known
/// price. The engine only ever touches `current_price` and `last_scrape`;
/// every other field round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "Set")]
    pub name: String,

    /// Target page URL. Items with an empty link are never scraped.
    #[serde(rename = "Link", default)]
    pub link: String,

    /// Last scraped price, currency-formatted (e.g. "$12.34").
    #[serde(rename = "Current Price", default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,

    /// When the price was last refreshed, in [`TIMESTAMP_FORMAT`].
    #[serde(rename = "Last Scrape", default, skip_serializing_if = "Option::is_none")]
    pub last_scrape: Option<String>,

    /// Columns owned by other tools, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            current_price: None,
            last_scrape: None,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_column_names() {
        let json = r#"
        {
            "Set": "Dominaria Remastered",
            "Link": "https://example.com/dmr",
            "Current Price": "$89.99",
            "Last Scrape": "2026-08-20 14:05"
        }
        "#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Dominaria Remastered");
        assert_eq!(item.link, "https://example.com/dmr");
        assert_eq!(item.current_price.as_deref(), Some("$89.99"));
        assert_eq!(item.last_scrape.as_deref(), Some("2026-08-20 14:05"));
    }

    #[test]
    fn test_optional_fields_absent() {
        let item: CatalogItem = serde_json::from_str(r#"{ "Set": "Alpha" }"#).unwrap();
        assert!(item.link.is_empty());
        assert!(item.current_price.is_none());
        assert!(item.last_scrape.is_none());

        // Absent optionals must not be serialized back as nulls.
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("Current Price"));
        assert!(!json.contains("Last Scrape"));
    }

    #[test]
    fn test_unknown_columns_round_trip() {
        let json = r#"
        {
            "Set": "Beta",
            "Link": "https://example.com/beta",
            "Owned": 3,
            "Notes": "sealed"
        }
        "#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.extra.len(), 2);

        let out = serde_json::to_string(&item).unwrap();
        let back: CatalogItem = serde_json::from_str(&out).unwrap();
        assert_eq!(back.extra.get("Owned"), Some(&serde_json::json!(3)));
        assert_eq!(back.extra.get("Notes"), Some(&serde_json::json!("sealed")));
    }
}
