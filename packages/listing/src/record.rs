//! Listing record types.
//!
//! A [`ListingRecord`] is produced by parsing remote page content and is never
//! mutated after creation; it is discarded once the invoice artifact has been
//! produced. [`NormalizedListing`] adds the derived numeric price.

use serde::{Deserialize, Serialize};

/// Heterogeneous price representation as it appears in page data.
///
/// Upstream pages serialize the selling price either as a JSON number or as a
/// currency-formatted string ("$45,000"). [`crate::normalize_price`] derives
/// the canonical numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

/// Seller details, when the page exposes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub name: Option<String>,
}

/// A listing as scraped from a marketplace page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing title. Validated non-empty before a record is accepted.
    pub title: String,

    /// Asking price, numeric or currency-formatted text.
    pub price: Price,

    /// Free-text description, when present.
    pub description: Option<String>,

    /// Item location, when present.
    pub location: Option<String>,

    /// Ordered image references, when present.
    pub images: Option<Vec<String>>,

    /// Seller display info, when present.
    pub seller: Option<Seller>,
}

impl ListingRecord {
    /// First image reference, if any. The invoice layout only ever shows one.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }
}

/// A [`ListingRecord`] plus its derived numeric price.
///
/// Invariant: `price_number` is finite and was derived from `record.price`;
/// construction fails rather than defaulting when no numeric value can be
/// derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(flatten)]
    pub record: ListingRecord,
    pub price_number: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_untagged() {
        let number: Price = serde_json::from_str("45000").unwrap();
        assert_eq!(number, Price::Number(45000.0));

        let text: Price = serde_json::from_str("\"$45,000\"").unwrap();
        assert_eq!(text, Price::Text("$45,000".to_string()));
    }

    #[test]
    fn test_thumbnail_is_first_image() {
        let record = ListingRecord {
            title: "1998 Ladder Truck".to_string(),
            price: Price::Number(45000.0),
            description: None,
            location: None,
            images: Some(vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string(),
            ]),
            seller: None,
        };

        assert_eq!(record.thumbnail(), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn test_thumbnail_absent_when_no_images() {
        let record = ListingRecord {
            title: "1998 Ladder Truck".to_string(),
            price: Price::Number(45000.0),
            description: None,
            location: None,
            images: None,
            seller: None,
        };

        assert_eq!(record.thumbnail(), None);
    }
}
