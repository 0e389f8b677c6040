//! Content-source response envelopes.
//!
//! Every endpoint wraps its payload in a `{"data": ...}` envelope. Record
//! bodies stay as raw [`serde_json::Value`]; structural interpretation
//! happens in [`crate::normalize`] so that shape drift in a single record
//! cannot fail a whole fetch.

use serde::Deserialize;
use serde_json::Value;

/// Envelope for single-document endpoints: `{ "data": { ... } | null }`.
#[derive(Debug, Deserialize)]
pub struct DocumentEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
}

/// Envelope for collection endpoints: `{ "data": [ ... ] }`.
///
/// `data` has been observed as `null` on misconfigured sources; both absent
/// and `null` decode to an empty collection.
#[derive(Debug, Deserialize)]
pub struct CollectionEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl CollectionEnvelope {
    /// Unwraps the record list, treating a missing or `null` `data` member as
    /// an empty collection.
    #[must_use]
    pub fn into_records(self) -> Vec<Value> {
        self.data.unwrap_or_default()
    }
}
