//! Listing page retrieval.

use tracing::{debug, info, warn};

use crate::error::{ListingError, Result};
use crate::identifier::ListingId;
use crate::price::normalize_price;
use crate::record::NormalizedListing;
use crate::scrape::{NextDataExtractor, PageExtractor};

/// Fetches a listing page and runs it through a [`PageExtractor`].
///
/// One network retrieval per call: no caching, no retries. A failed fetch is
/// a terminal failure for that request, and concurrent fetches share nothing
/// beyond the connection pool inside the client.
pub struct ListingFetcher {
    client: reqwest::Client,
    user_agent: String,
    extractor: Box<dyn PageExtractor>,
}

impl Default for ListingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingFetcher {
    /// Create a fetcher with default settings and the [`NextDataExtractor`].
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "GarageInvoiceBot/1.0".to_string(),
            extractor: Box::new(NextDataExtractor::new()),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Swap the scraping strategy.
    pub fn with_extractor(mut self, extractor: impl PageExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Retrieve the listing page at `source_url` and extract the normalized
    /// listing it embeds.
    ///
    /// Each failure mode is reported as its own [`ListingError`] category:
    /// transport failure, non-success status, missing or malformed embedded
    /// data, unexpected payload shape, unparseable price.
    pub async fn fetch(&self, id: &ListingId, source_url: &str) -> Result<NormalizedListing> {
        debug!(listing_id = %id, url = %source_url, "listing fetch starting");

        let response = self
            .client
            .get(source_url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %source_url, error = %e, "listing page request failed");
                ListingError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %source_url, status = %status, "listing page returned non-success status");
            return Err(ListingError::FetchStatus {
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| ListingError::Transport(Box::new(e)))?;

        debug!(
            url = %source_url,
            content_length = html.len(),
            extractor = self.extractor.name(),
            "listing page fetched"
        );

        let record = self.extractor.extract(&html)?;
        let price_number = normalize_price(&record.price)?;

        info!(
            listing_id = %id,
            title = %record.title,
            price = price_number,
            "listing extracted"
        );

        Ok(NormalizedListing {
            record,
            price_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ListingRecord, Price};

    struct FixedExtractor(ListingRecord);

    impl PageExtractor for FixedExtractor {
        fn extract(&self, _html: &str) -> Result<ListingRecord> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_extractor_can_be_swapped() {
        let record = ListingRecord {
            title: "Tanker".to_string(),
            price: Price::Number(1.0),
            description: None,
            location: None,
            images: None,
            seller: None,
        };

        let fetcher = ListingFetcher::new().with_extractor(FixedExtractor(record));
        assert_eq!(fetcher.extractor.name(), "fixed");
    }
}
