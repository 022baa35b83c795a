// Minimal client for the Resend transactional-email API.
// https://resend.com/docs/api-reference/emails/send-email

pub mod models;

use base64::Engine as _;
use reqwest::Client;
use thiserror::Error;

use crate::models::{Attachment, ErrorResponse, SendEmailRequest, SendEmailResponse};

const SEND_EMAIL_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum ResendError {
    /// The request never produced a usable response
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the email
    #[error("email provider error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct ResendOptions {
    pub api_key: String,
    pub from_email: String,
}

#[derive(Debug, Clone)]
pub struct ResendService {
    options: ResendOptions,
    client: Client,
}

impl ResendService {
    pub fn new(options: ResendOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send one email with a single binary attachment.
    ///
    /// The attachment bytes are base64-encoded into the JSON body as the API
    /// expects. Returns the provider's message id on success.
    pub async fn send_with_attachment(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        filename: &str,
        attachment: &[u8],
    ) -> Result<SendEmailResponse, ResendError> {
        let request = SendEmailRequest {
            from: self.options.from_email.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
            attachments: vec![Attachment {
                filename: filename.to_string(),
                content: base64::engine::general_purpose::STANDARD.encode(attachment),
            }],
        };

        let response = self
            .client
            .post(SEND_EMAIL_URL)
            .bearer_auth(&self.options.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) if !body.message.is_empty() => body.message,
                _ => "email provider returned an error".to_string(),
            };
            tracing::warn!(status = %status, message = %message, "resend rejected email");
            return Err(ResendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<SendEmailResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = SendEmailRequest {
            from: "onboarding@resend.dev".to_string(),
            to: vec!["buyer@example.com".to_string()],
            subject: "Invoice".to_string(),
            html: "<p>Please find the invoice attached.</p>".to_string(),
            attachments: vec![Attachment {
                filename: "invoice.pdf".to_string(),
                content: base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.5"),
            }],
        };

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["from"], "onboarding@resend.dev");
        assert_eq!(body["to"][0], "buyer@example.com");
        assert_eq!(body["attachments"][0]["filename"], "invoice.pdf");
        assert_eq!(body["attachments"][0]["content"], "JVBERi0xLjU=");
    }
}
