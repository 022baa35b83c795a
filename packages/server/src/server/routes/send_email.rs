use axum::extract::multipart::Field;
use axum::extract::{Extension, Multipart};
use axum::Json;
use serde::Serialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

const DEFAULT_SUBJECT: &str = "Invoice";
const DEFAULT_MESSAGE: &str = "Please find the invoice attached.";
const ATTACHMENT_FILENAME: &str = "invoice.pdf";

#[derive(Debug, Serialize)]
pub struct SendEmailReply {
    pub success: bool,
    pub message: String,
    pub id: String,
}

/// Email a previously generated invoice PDF to a recipient.
///
/// Multipart form: `email` (required), `subject` and `message` (optional,
/// defaulted), `pdf` (required file part). Delegates to the configured email
/// provider and reports its message id.
pub async fn send_email_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SendEmailReply>, ApiError> {
    let mut email: Option<String> = None;
    let mut subject: Option<String> = None;
    let mut message: Option<String> = None;
    let mut pdf: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => email = Some(read_text(field).await?),
            Some("subject") => subject = Some(read_text(field).await?),
            Some("message") => message = Some(read_text(field).await?),
            Some("pdf") => {
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("could not read pdf field: {e}"))
                })?;
                pdf = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let email = email.filter(|value| !value.is_empty());
    let pdf = pdf.filter(|value| !value.is_empty());
    let (Some(email), Some(pdf)) = (email, pdf) else {
        return Err(ApiError::BadRequest(
            "email and pdf file are required".to_string(),
        ));
    };

    let resend = state.resend.as_ref().ok_or(ApiError::EmailNotConfigured)?;

    let subject = subject
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
    let body = message
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
    let html = format!("<p>{body}</p>");

    let sent = resend
        .send_with_attachment(&email, &subject, &html, ATTACHMENT_FILENAME, &pdf)
        .await?;

    tracing::info!(email_id = %sent.id, "invoice email sent");

    Ok(Json(SendEmailReply {
        success: true,
        message: "Email sent successfully".to_string(),
        id: sent.id,
    }))
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("could not read form field: {e}")))
}
