//! HTTP client for the transactional-email provider.
//!
//! One endpoint: `POST {base}/emails` with bearer auth, returning the
//! provider's message id. Exactly one outbound request per send; transient
//! failures surface immediately with no retry.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MailerError;
use crate::message::ContactMessage;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Wire body for the provider's transactional-send endpoint.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    #[serde(rename = "replyTo")]
    reply_to: &'a str,
    subject: String,
    html: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Client for the transactional-email provider.
///
/// Use [`MailerClient::new`] for production or
/// [`MailerClient::with_base_url`] to point at a mock server in tests.
pub struct MailerClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MailerClient {
    /// Creates a new client pointed at the production provider API.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, MailerError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("folio/0.1 (contact-relay)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends a contact message to `recipient`, with `from` as the verified
    /// sender and the submitter's address as reply-to.
    ///
    /// Returns the provider's message id on success.
    ///
    /// # Errors
    ///
    /// - [`MailerError::Http`] on network failure.
    /// - [`MailerError::Rejected`] if the provider returns a non-success
    ///   status; the provider's error message is extracted best-effort.
    /// - [`MailerError::Deserialize`] if the success body lacks an id.
    pub async fn send_contact_message(
        &self,
        from: &str,
        recipient: &str,
        message: &ContactMessage,
    ) -> Result<String, MailerError> {
        let body = SendEmailRequest {
            from,
            to: vec![recipient],
            reply_to: &message.email,
            subject: message.subject(),
            html: message.html_body(),
            text: message.text_body(),
        };

        let url = format!("{}/emails", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| "provider returned an error".to_owned());
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let payload = response.text().await?;
        let parsed: SendEmailResponse =
            serde_json::from_str(&payload).map_err(|e| MailerError::Deserialize {
                context: url,
                source: e,
            })?;
        Ok(parsed.id)
    }
}
