//! Canonical listing identifier extraction.
//!
//! Listing paths embed the identifier as a trailing segment after a
//! human-readable slug, e.g. `/listing/1998-ladder-truck-<uuid>`. The slug
//! itself can contain incidental hex-like runs, so when the path holds more
//! than one candidate token the last one wins.

use std::fmt;

use uuid::Uuid;

/// The canonical 36-character grouped-hexadecimal token naming a listing.
///
/// Derived from the request URL, never stored; lives for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Extract a listing id from an arbitrary URL string.
    ///
    /// Returns `None` for unparseable input or for a URL whose path contains
    /// no canonical token. Malformed input and "no identifier present" are
    /// the same outcome; this never panics and never errors.
    pub fn from_url(url: &str) -> Option<ListingId> {
        let parsed = url::Url::parse(url).ok()?;

        let token_pattern = regex::Regex::new(
            r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        )
        .unwrap();

        // Last match in left-to-right scan order takes priority.
        let token = token_pattern.find_iter(parsed.path()).last()?;

        Uuid::parse_str(token.as_str()).ok().map(ListingId)
    }

    /// First 8 hex digits, uppercase. Used as the order code and as the
    /// trailing segment of the invoice number.
    pub fn short_code(&self) -> String {
        self.0.simple().to_string()[..8].to_uppercase()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_token_from_path() {
        let id = ListingId::from_url(
            "https://example.com/listing/1998-ladder-truck-d2a03277-b4c6-4883-a00c-33ecfc91c25c",
        )
        .unwrap();

        assert_eq!(id.to_string(), "d2a03277-b4c6-4883-a00c-33ecfc91c25c");
    }

    #[test]
    fn test_last_token_wins_when_path_has_several() {
        let id = ListingId::from_url(
            "https://example.com/listing/abc-11111111-1111-1111-1111-111111111111-22222222-2222-2222-2222-222222222222",
        )
        .unwrap();

        assert_eq!(id.to_string(), "22222222-2222-2222-2222-222222222222");
    }

    #[test]
    fn test_invalid_url_reports_failure_without_panicking() {
        assert!(ListingId::from_url("not a url").is_none());
        assert!(ListingId::from_url("").is_none());
    }

    #[test]
    fn test_path_without_token_reports_failure() {
        assert!(ListingId::from_url("https://example.com/listing/no-id-here").is_none());
    }

    #[test]
    fn test_token_outside_path_does_not_count() {
        // Only the path component is scanned.
        let url = "https://example.com/listing/plain?ref=d2a03277-b4c6-4883-a00c-33ecfc91c25c";
        assert!(ListingId::from_url(url).is_none());
    }

    #[test]
    fn test_uppercase_token_is_canonicalized() {
        let id = ListingId::from_url(
            "https://example.com/listing/D2A03277-B4C6-4883-A00C-33ECFC91C25C",
        )
        .unwrap();

        assert_eq!(id.to_string(), "d2a03277-b4c6-4883-a00c-33ecfc91c25c");
    }

    #[test]
    fn test_short_code() {
        let id = ListingId::from_url(
            "https://example.com/listing/d2a03277-b4c6-4883-a00c-33ecfc91c25c",
        )
        .unwrap();

        assert_eq!(id.short_code(), "D2A03277");
    }
}
