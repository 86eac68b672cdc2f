//! Data models for Article Search responses and the records derived from them.
//!
//! A search hit travels through three shapes:
//! - [`RawRecord`]: the nested document exactly as the API returned it
//! - [`FlatRecord`]: the same document with nested objects collapsed into
//!   dot-joined keys (see [`crate::flatten`])
//! - [`ProjectedRecord`]: a flat record restricted to the article schema
//!
//! One fetched page becomes one [`Batch`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status marker the Article Search API uses for a successful response.
pub const SUCCESS_STATUS: &str = "OK";

/// A single search hit, arbitrarily nested.
pub type RawRecord = Map<String, Value>;

/// A record whose values are never JSON objects.
///
/// Arrays are kept as opaque leaves. Key order follows the order in which
/// leaves were encountered in the raw record.
pub type FlatRecord = Map<String, Value>;

/// A flat record holding only schema fields.
pub type ProjectedRecord = FlatRecord;

/// Projected records for one page, in API response order.
pub type Batch = Vec<ProjectedRecord>;

/// The decoded top-level body of an `articlesearch.json` response.
///
/// Both fields are optional and `status` is kept as raw JSON: error payloads
/// from the API frequently omit `response`, gateway faults omit `status`
/// entirely, and throttling answers may carry a numeric status. Whether the
/// page counts as a success is decided by [`SearchEnvelope::is_ok`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchEnvelope {
    /// `"OK"` on success, anything else (or nothing) on failure.
    #[serde(default)]
    pub status: Option<Value>,
    /// The result container.
    #[serde(default)]
    pub response: Option<SearchResponse>,
}

/// The `response` object of a search envelope.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// One entry per search hit. `None` when the container is absent.
    #[serde(default)]
    pub docs: Option<Vec<RawRecord>>,
}

impl SearchEnvelope {
    /// True when the envelope carries the literal success marker.
    pub fn is_ok(&self) -> bool {
        matches!(&self.status, Some(Value::String(s)) if s == SUCCESS_STATUS)
    }

    /// Status for reporting. Strings print bare, other JSON values print
    /// compact, and a missing status reads as `"<missing>"`.
    pub fn status_label(&self) -> String {
        match &self.status {
            None => "<missing>".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Consume the envelope and hand back its documents, if the container exists.
    pub fn into_docs(self) -> Option<Vec<RawRecord>> {
        self.response.and_then(|r| r.docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_deserialization() {
        let body = r#"{
            "status": "OK",
            "copyright": "Copyright (c) 2020 The New York Times Company.",
            "response": {
                "docs": [
                    {"_id": "nyt://article/1", "headline": {"main": "First"}},
                    {"_id": "nyt://article/2", "headline": {"main": "Second"}}
                ],
                "meta": {"hits": 2, "offset": 0, "time": 12}
            }
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.is_ok());
        let docs = envelope.into_docs().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["_id"], json!("nyt://article/1"));
        assert_eq!(docs[1]["headline"]["main"], json!("Second"));
    }

    #[test]
    fn test_error_envelope_without_response() {
        let body = r#"{"status": "ERROR", "errors": ["page must be <= 100"]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.status_label(), "ERROR");
        assert!(envelope.into_docs().is_none());
    }

    #[test]
    fn test_fault_envelope_without_status() {
        let body = r#"{"fault": {"faultstring": "Invalid ApiKey"}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.status_label(), "<missing>");
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let envelope = SearchEnvelope {
            status: Some(json!("ok")),
            response: None,
        };
        assert!(!envelope.is_ok());
    }

    #[test]
    fn test_non_string_status_decodes_as_failure() {
        let body = r#"{"status": 429, "errors": ["Too Many Requests"]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.status_label(), "429");

        let envelope: SearchEnvelope = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert!(!envelope.is_ok());
    }

    #[test]
    fn test_response_without_docs_container() {
        let envelope: SearchEnvelope =
            serde_json::from_str(r#"{"status": "OK", "response": {"meta": {}}}"#).unwrap();
        assert!(envelope.is_ok());
        assert!(envelope.into_docs().is_none());
    }

    #[test]
    fn test_empty_docs_container() {
        let envelope: SearchEnvelope =
            serde_json::from_str(r#"{"status": "OK", "response": {"docs": []}}"#).unwrap();
        assert_eq!(envelope.into_docs().unwrap().len(), 0);
    }
}
