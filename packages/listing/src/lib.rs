//! Marketplace Listing Extraction Library
//!
//! Turns a marketplace listing URL into a normalized listing record:
//!
//! 1. [`ListingId::from_url`] pulls the canonical identifier out of the URL
//!    path.
//! 2. [`ListingFetcher`] retrieves the listing page and hands the raw HTML to
//!    a [`PageExtractor`].
//! 3. [`NextDataExtractor`] (the default extractor) mines the embedded
//!    `__NEXT_DATA__` script block for the listing-preview payload.
//! 4. [`normalize_price`] derives a numeric price from the heterogeneous
//!    number-or-text representation the payload carries.
//!
//! The scraping strategy is deliberately isolated behind the [`PageExtractor`]
//! seam: the upstream page's internal data format is brittle by construction,
//! and swapping the strategy must not touch the rest of the pipeline.
//!
//! Everything here is request-scoped. There is no caching of fetched listings
//! and no shared mutable state; concurrent fetches are fully independent.

pub mod error;
pub mod fetch;
pub mod identifier;
pub mod price;
pub mod record;
pub mod scrape;

// Re-export core types at crate root
pub use error::{ListingError, Result};
pub use fetch::ListingFetcher;
pub use identifier::ListingId;
pub use price::{format_usd, normalize_price};
pub use record::{ListingRecord, NormalizedListing, Price, Seller};
pub use scrape::{NextDataExtractor, PageExtractor};
