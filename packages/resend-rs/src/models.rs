use serde::{Deserialize, Serialize};

/// Wire shape for `POST /emails`.
#[derive(Debug, Serialize)]
pub struct SendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Base64-encoded file attached to an outgoing email.
#[derive(Debug, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}

/// Error body the API returns on rejection.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub name: String,
}
