//! Typed errors for the listing library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match on
//! the failure category. The HTTP boundary maps categories to status codes by
//! matching variants, never by inspecting message text.

use thiserror::Error;

/// Errors that can occur while extracting and normalizing a listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The URL did not parse, or its path carries no canonical identifier
    #[error("could not find a listing id in the URL")]
    IdentifierNotFound,

    /// The listing page could not be retrieved at the transport level
    #[error("could not retrieve listing page: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The listing page responded with a non-success status
    #[error("could not retrieve listing page: HTTP {status}")]
    FetchStatus { status: u16 },

    /// No embedded structured-data block in the page HTML
    #[error("structured data not found in page")]
    StructuredDataMissing,

    /// The embedded block is not valid JSON
    #[error("structured data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded page data has no listing preview at the expected path
    #[error("listing preview not found in page data")]
    PreviewNotFound,

    /// The listing-preview payload fails record validation
    #[error("listing data has unexpected shape: {issues}")]
    UnexpectedShape { issues: String },

    /// A textual price with no derivable numeric value
    #[error("invalid price format: {raw:?}")]
    InvalidPrice { raw: String },
}

/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;
