//! Chat request/response envelopes and the product-search result shape.
//!
//! These are the value objects that cross the HTTP boundary. A request is
//! transient (one per invocation, never persisted); a response is
//! constructed once and immutable after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ProductSnapshot;

/// An incoming chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The raw user message
    pub message: String,

    /// Optional user identifier. Accepted as a JSON number or a numeric
    /// string; anything unparsable is treated as "no user", not an error.
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Create a request with no user attached.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
        }
    }

    /// Create a request on behalf of a known user.
    pub fn for_user(message: impl Into<String>, user_id: i64) -> Self {
        Self {
            message: message.into(),
            user_id: Some(serde_json::Value::from(user_id)),
        }
    }

    /// The user id as a number, if one was sent and parses.
    pub fn numeric_user_id(&self) -> Option<i64> {
        match &self.user_id {
            Some(serde_json::Value::Number(n)) => n.as_i64(),
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// How a chat response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    /// The language model answered
    Success,
    /// The deterministic fallback engine answered
    Fallback,
}

/// The assistant's reply envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The text shown to the user
    pub response: String,

    /// Whether the model or the fallback engine produced it
    pub status: ChatStatus,

    /// When the response was constructed
    pub timestamp: DateTime<Utc>,

    /// Diagnostic note, present only on provider-failure degradation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatResponse {
    /// A model-produced response.
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: ChatStatus::Success,
            timestamp: Utc::now(),
            message: None,
        }
    }

    /// A fallback-engine response, optionally carrying a diagnostic note.
    pub fn fallback(response: impl Into<String>, diagnostic: Option<String>) -> Self {
        Self {
            response: response.into(),
            status: ChatStatus::Fallback,
            timestamp: Utc::now(),
            message: diagnostic,
        }
    }
}

/// A successful product search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of products matched (equals `products.len()`)
    pub found: usize,

    /// The query echoed back
    pub query: String,

    /// The category filter echoed back
    #[serde(default)]
    pub category: Option<String>,

    /// The matching products, capped by the orchestrator
    pub products: Vec<ProductSnapshot>,

    /// Human-readable result summary
    pub message: String,
}

/// The outcome of a product search: results, or a user-safe error shape.
///
/// Serialized untagged so the wire shape matches the two JSON objects the
/// HTTP surface documents — `{found, query, category, products, message}`
/// or `{error, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(SearchResult),
    Unavailable {
        /// Short machine-ish error label, never raw exception text
        error: String,
        /// User-safe explanation
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_from_number_and_string() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi","userId":42}"#).unwrap();
        assert_eq!(req.numeric_user_id(), Some(42));

        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi","userId":"42"}"#).unwrap();
        assert_eq!(req.numeric_user_id(), Some(42));
    }

    #[test]
    fn unparsable_user_id_is_no_user() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","userId":"not-a-number"}"#).unwrap();
        assert_eq!(req.numeric_user_id(), None);

        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.numeric_user_id(), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let resp = ChatResponse::success("hello");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""status":"success""#));
        // No diagnostic on success
        assert!(!json.contains(r#""message""#));
    }

    #[test]
    fn fallback_carries_diagnostic() {
        let resp = ChatResponse::fallback("degraded", Some("assistant unavailable".into()));
        assert_eq!(resp.status, ChatStatus::Fallback);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("assistant unavailable"));
    }

    #[test]
    fn search_outcome_wire_shapes() {
        let found = SearchOutcome::Found(SearchResult {
            found: 1,
            query: "bike".into(),
            category: None,
            products: vec![ProductSnapshot::new("Trek 520", "Sports")],
            message: "Found 1 products for 'bike'".into(),
        });
        let json = serde_json::to_string(&found).unwrap();
        assert!(json.contains(r#""found":1"#));
        assert!(json.contains("Trek 520"));

        let unavailable = SearchOutcome::Unavailable {
            error: "Failed to search products".into(),
            message: "Products could not be loaded at this moment".into(),
        };
        let json = serde_json::to_string(&unavailable).unwrap();
        assert!(json.contains(r#""error""#));
        assert!(!json.contains("found"));
    }
}
