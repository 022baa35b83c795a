//! Invoice document composition.
//!
//! Consumes a normalized listing plus request metadata and produces the
//! paginated invoice artifact. The PDF layout itself lives in [`pdf`]; this
//! module owns the surrounding data shapes, numbering and date formatting.

mod pdf;

pub use pdf::InvoicePdf;

use chrono::{DateTime, Utc};
use listing::{ListingId, NormalizedListing};
use serde::Deserialize;

/// Buyer details supplied by the caller. All fields are optional free text;
/// absent fields render as bracketed placeholders on the invoice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    pub name: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city_state_zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Everything the composer needs for one invoice.
#[derive(Debug)]
pub struct InvoiceData<'a> {
    pub listing: &'a NormalizedListing,
    pub id: &'a ListingId,
    pub source_url: &'a str,
    pub invoice_number: String,
    pub date: String,
    pub buyer: Option<&'a BuyerInfo>,
}

/// `INV-YYYYMMDD-XXXXXXXX`: generation date plus the listing order code.
pub fn invoice_number(now: DateTime<Utc>, id: &ListingId) -> String {
    format!("INV-{}-{}", now.format("%Y%m%d"), id.short_code())
}

/// US long-form date, e.g. "August 6, 2026".
pub fn format_invoice_date(now: DateTime<Utc>) -> String {
    now.format("%B %-d, %Y").to_string()
}
