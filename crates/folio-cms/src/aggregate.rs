//! The content aggregator: six concurrent fetches folded into one snapshot.
//!
//! The profile document is the single required resource. Every other resource
//! degrades to an empty default when its fetch fails, and a failure on the
//! critical path degrades the whole snapshot to the canned fallback. Callers
//! therefore never see an error from [`ContentAggregator::fetch_snapshot`].

use serde_json::Value;

use folio_core::PortfolioSnapshot;

use crate::client::CmsClient;
use crate::error::CmsError;
use crate::normalize;

/// Fetches all published content and folds it into a [`PortfolioSnapshot`].
pub struct ContentAggregator {
    client: CmsClient,
}

impl ContentAggregator {
    #[must_use]
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    /// Fetches and normalizes the complete snapshot.
    ///
    /// Never fails: any error on the critical path resolves to
    /// [`PortfolioSnapshot::fallback`] so the page always has something to
    /// render.
    pub async fn fetch_snapshot(&self) -> PortfolioSnapshot {
        match self.try_fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "content fetch failed, serving fallback snapshot");
                PortfolioSnapshot::fallback()
            }
        }
    }

    /// The fallible inner fetch. All six requests start before any result is
    /// awaited; only a profile failure propagates.
    async fn try_fetch_snapshot(&self) -> Result<PortfolioSnapshot, CmsError> {
        let (profile, engagements, skills, cv, metadata, social) = tokio::join!(
            self.client.fetch_profile(),
            self.client.fetch_engagements(),
            self.client.fetch_skills(),
            self.client.fetch_cv(),
            self.client.fetch_metadata(),
            self.client.fetch_social_channels(),
        );

        let origin = self.client.origin();

        let profile_record = profile?.ok_or(CmsError::MissingProfile)?;
        let profile = normalize::normalize_profile(&profile_record, origin)
            .ok_or(CmsError::MissingProfile)?;

        let cv_document = document_or_absent(cv, "cv");
        let metadata_document = document_or_absent(metadata, "metadata");

        Ok(PortfolioSnapshot {
            profile,
            engagements: normalize::normalize_engagements(
                &records_or_empty(engagements, "work-experiences"),
                origin,
            ),
            skills: normalize::normalize_skills(&records_or_empty(skills, "technologies")),
            cv: normalize::normalize_cv(cv_document.as_ref(), origin),
            metadata: metadata_document
                .as_ref()
                .and_then(|record| normalize::normalize_metadata(record, origin)),
            social_channels: normalize::normalize_social_channels(
                &records_or_empty(social, "social-links"),
                origin,
            ),
        })
    }
}

/// Collapses a failed collection fetch into an empty record list, logging the
/// loss. One resource's outage must not block the others.
fn records_or_empty(result: Result<Vec<Value>, CmsError>, resource: &str) -> Vec<Value> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(resource, error = %e, "resource fetch failed, defaulting to empty");
            Vec::new()
        }
    }
}

/// Collapses a failed single-document fetch into an absent document.
fn document_or_absent(result: Result<Option<Value>, CmsError>, resource: &str) -> Option<Value> {
    match result {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(resource, error = %e, "resource fetch failed, defaulting to absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_or_empty_passes_records_through() {
        let records = vec![serde_json::json!({"id": 1})];
        assert_eq!(records_or_empty(Ok(records.clone()), "test"), records);
    }

    #[test]
    fn records_or_empty_collapses_errors() {
        let result: Result<Vec<Value>, CmsError> = Err(CmsError::MissingProfile);
        assert!(records_or_empty(result, "test").is_empty());
    }

    #[test]
    fn document_or_absent_collapses_errors() {
        let result: Result<Option<Value>, CmsError> = Err(CmsError::MissingProfile);
        assert!(document_or_absent(result, "test").is_none());
    }
}
