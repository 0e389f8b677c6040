//! HTTP client for the headless content source.
//!
//! Wraps `reqwest` with envelope handling and typed errors. Each fetch method
//! maps to one published resource; single documents return the unwrapped
//! `data` member and collections return the raw record list. Field-level
//! interpretation of records happens in [`crate::normalize`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::CmsError;
use crate::types::{CollectionEnvelope, DocumentEnvelope};

/// Client for the content source's REST API.
///
/// Holds the HTTP client and the source origin. The origin doubles as the
/// prefix for resolving relative asset URLs, so it is stored without a
/// trailing slash and exposed via [`CmsClient::origin`].
#[derive(Debug)]
pub struct CmsClient {
    client: Client,
    origin: String,
}

impl CmsClient {
    /// Creates a new client for the content source at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("folio/0.1 (portfolio-content)")
            .build()?;

        let origin = base_url.trim_end_matches('/').to_owned();
        Url::parse(&origin)
            .map_err(|e| CmsError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, origin })
    }

    /// Base origin of the content source, without a trailing slash. Relative
    /// asset paths in record payloads resolve against this.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetches the profile single document.
    ///
    /// Returns `Ok(None)` when the document exists but is unpublished
    /// (`"data": null`).
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_profile(&self) -> Result<Option<Value>, CmsError> {
        self.fetch_document("welcome?populate=*").await
    }

    /// Fetches the work-history collection, newest first.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_engagements(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection("work-experiences?populate=*&sort=startDate:desc")
            .await
    }

    /// Fetches the skill collection, most experienced first.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_skills(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection("technologies?populate=*&sort=yearsOfExperience:desc")
            .await
    }

    /// Fetches the CV single document.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_cv(&self) -> Result<Option<Value>, CmsError> {
        self.fetch_document("cv?populate=*").await
    }

    /// Fetches the site-metadata single document.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_metadata(&self) -> Result<Option<Value>, CmsError> {
        self.fetch_document("metadata?populate=*").await
    }

    /// Fetches the social-link collection with icons populated.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CmsError::Deserialize`] if the body is not a JSON envelope.
    pub async fn fetch_social_channels(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection("social-links?populate=icon").await
    }

    async fn fetch_document(&self, resource: &str) -> Result<Option<Value>, CmsError> {
        let body = self.request_json(resource).await?;
        let envelope: DocumentEnvelope =
            serde_json::from_value(body).map_err(|e| CmsError::Deserialize {
                context: resource.to_owned(),
                source: e,
            })?;
        Ok(envelope.data)
    }

    async fn fetch_collection(&self, resource: &str) -> Result<Vec<Value>, CmsError> {
        let body = self.request_json(resource).await?;
        let envelope: CollectionEnvelope =
            serde_json::from_value(body).map_err(|e| CmsError::Deserialize {
                context: resource.to_owned(),
                source: e,
            })?;
        Ok(envelope.into_records())
    }

    /// Sends a GET request under `/api/`, asserts a 2xx status, and parses
    /// the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] on network failure or a non-2xx status.
    /// Returns [`CmsError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, resource: &str) -> Result<Value, CmsError> {
        let url = format!("{}/api/{resource}", self.origin);
        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
            context: url,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash_from_origin() {
        let client = CmsClient::new("http://localhost:1337/", 10)
            .expect("client construction should not fail");
        assert_eq!(client.origin(), "http://localhost:1337");
    }

    #[test]
    fn new_keeps_origin_without_trailing_slash() {
        let client = CmsClient::new("https://cms.example.com", 10)
            .expect("client construction should not fail");
        assert_eq!(client.origin(), "https://cms.example.com");
    }

    #[test]
    fn new_rejects_unparseable_base_url() {
        let err = CmsClient::new("not a url", 10).unwrap_err();
        assert!(matches!(err, CmsError::InvalidBaseUrl(_)));
    }
}
