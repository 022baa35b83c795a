//! Page-data scraping behind a narrow adapter seam.
//!
//! Server-rendered listing pages ship their hydration state in an embedded
//! structured-data script block. Relying on that block is brittle by
//! construction: any change to the upstream page's internal data format
//! breaks extraction. The [`PageExtractor`] trait keeps that coupling in one
//! place — raw HTML in, [`ListingRecord`]-or-error out — so the strategy can
//! be swapped without touching the fetcher or the rest of the pipeline.

use serde_json::Value;

use crate::error::{ListingError, Result};
use crate::record::{ListingRecord, Price};

/// Script element whose `id` attribute marks the embedded page data.
const PAGE_DATA_TAG: &str = "__NEXT_DATA__";

/// Key path from the decoded page data to the listing-preview payload.
const PREVIEW_POINTER: &str = "/props/pageProps/listingPreview";

/// Narrow scraping adapter: raw HTML in, listing record or error out.
pub trait PageExtractor: Send + Sync {
    /// Extract a validated [`ListingRecord`] from a listing page's HTML.
    fn extract(&self, html: &str) -> Result<ListingRecord>;

    /// Extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Extractor for pages that embed their data in a `__NEXT_DATA__` block.
///
/// Algorithm:
/// 1. Locate the first script element tagged [`PAGE_DATA_TAG`] and capture
///    its textual content.
/// 2. Decode the content as JSON.
/// 3. Navigate the fixed key path to the listing-preview payload.
/// 4. Map the raw payload to a [`ListingRecord`], then validate it.
#[derive(Debug, Default)]
pub struct NextDataExtractor;

impl NextDataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Map the raw preview payload to a record, applying the defaulting
    /// rules, and validate the result.
    ///
    /// Defaulting: a missing title becomes an empty string (rejected by
    /// validation below, which keeps mapping and validation distinct), a
    /// missing price becomes numeric zero, missing description/location/
    /// seller stay absent, and a single `imageUrl` becomes a one-element
    /// image sequence.
    fn map_preview(&self, preview: &Value) -> Result<ListingRecord> {
        let mut issues: Vec<String> = Vec::new();

        let title = match preview.get("listingTitle") {
            Some(Value::String(title)) => title.clone(),
            None | Some(Value::Null) => String::new(),
            Some(_) => {
                issues.push("listingTitle: expected a string".to_string());
                String::new()
            }
        };
        if title.is_empty() && issues.is_empty() {
            issues.push("listingTitle: expected a non-empty string".to_string());
        }

        let price = match preview.get("sellingPrice") {
            Some(Value::Number(number)) => Price::Number(number.as_f64().unwrap_or(0.0)),
            Some(Value::String(text)) => Price::Text(text.clone()),
            None | Some(Value::Null) => Price::Number(0.0),
            Some(_) => {
                issues.push("sellingPrice: expected a number or a string".to_string());
                Price::Number(0.0)
            }
        };

        if !issues.is_empty() {
            return Err(ListingError::UnexpectedShape {
                issues: issues.join("; "),
            });
        }

        let description = preview
            .get("listingDescription")
            .and_then(Value::as_str)
            .map(str::to_string);

        let images = preview
            .get("imageUrl")
            .and_then(Value::as_str)
            .map(|image_url| vec![image_url.to_string()]);

        Ok(ListingRecord {
            title,
            price,
            description,
            // Not available in preview data
            location: None,
            images,
            seller: None,
        })
    }
}

impl PageExtractor for NextDataExtractor {
    fn extract(&self, html: &str) -> Result<ListingRecord> {
        let script_pattern = regex::Regex::new(&format!(
            r#"(?s)<script id="{PAGE_DATA_TAG}"[^>]*>(.*?)</script>"#
        ))
        .unwrap();

        let raw_json = script_pattern
            .captures(html)
            .and_then(|captures| captures.get(1))
            .ok_or(ListingError::StructuredDataMissing)?;

        let page_data: Value = serde_json::from_str(raw_json.as_str())?;

        let preview = page_data
            .pointer(PREVIEW_POINTER)
            .filter(|preview| !preview.is_null())
            .ok_or(ListingError::PreviewNotFound)?;

        self.map_preview(preview)
    }

    fn name(&self) -> &str {
        "next-data"
    }
}
