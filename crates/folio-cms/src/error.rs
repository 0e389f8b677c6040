use thiserror::Error;

/// Errors returned by the content-source client.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// response status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid content source URL: {0}")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected envelope.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The profile document is missing or unpublished. The profile is the one
    /// resource the snapshot cannot be assembled without.
    #[error("profile document missing from content source")]
    MissingProfile,
}
