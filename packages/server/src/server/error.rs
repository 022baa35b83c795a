//! Request-boundary error type.
//!
//! Every pipeline failure is converted here into a JSON error envelope with a
//! status code taken from a fixed per-category lookup. Status codes are never
//! inferred from message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use listing::ListingError;
use resend::ResendError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Extraction pipeline failure; status depends on the category
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// Malformed or incomplete request
    #[error("{0}")]
    BadRequest(String),

    /// PDF composition failed
    #[error("failed to compose invoice document: {0}")]
    Compose(String),

    /// Delivery requested but no email provider is configured
    #[error("email service is not configured")]
    EmailNotConfigured,

    /// The email provider rejected the send
    #[error(transparent)]
    Delivery(#[from] ResendError),
}

impl ApiError {
    /// Fixed category-to-status lookup.
    ///
    /// Caller mistakes are 4xx; upstream listing-page faults are 502; faults
    /// in this service or its email provider are 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Listing(ListingError::IdentifierNotFound) => StatusCode::BAD_REQUEST,
            ApiError::Listing(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Compose(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::EmailNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
