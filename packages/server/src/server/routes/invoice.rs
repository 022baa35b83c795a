use axum::extract::Extension;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use listing::{ListingError, ListingId};
use serde::Deserialize;

use crate::invoice::{format_invoice_date, invoice_number, BuyerInfo, InvoiceData, InvoicePdf};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct InvoiceRequest {
    pub url: String,
    #[serde(default, rename = "buyerInfo")]
    pub buyer_info: Option<BuyerInfo>,
}

/// Generate a PDF invoice for the listing behind `url`.
///
/// One network fetch per request; the listing, the identifier and the
/// rendered artifact all live only for the duration of this handler.
pub async fn invoice_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Response, ApiError> {
    let id = ListingId::from_url(&request.url).ok_or(ListingError::IdentifierNotFound)?;

    let normalized = state.fetcher.fetch(&id, &request.url).await?;

    let now = Utc::now();
    let data = InvoiceData {
        listing: &normalized,
        id: &id,
        source_url: &request.url,
        invoice_number: invoice_number(now, &id),
        date: format_invoice_date(now),
        buyer: request.buyer_info.as_ref(),
    };

    let pdf = InvoicePdf::render(&data).map_err(|e| ApiError::Compose(e.to_string()))?;

    tracing::info!(
        listing_id = %id,
        invoice_number = %data.invoice_number,
        size = pdf.len(),
        "invoice generated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=invoice.pdf"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        pdf,
    )
        .into_response())
}
