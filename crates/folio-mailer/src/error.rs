use thiserror::Error;

/// Errors returned by the email-provider client.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the send with a non-success status. `detail` is
    /// the provider's error message when one could be extracted.
    #[error("provider rejected send ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The provider's success response could not be deserialized.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
