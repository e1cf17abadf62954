//! Wire types for the read endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Success envelope returned by the backend:
/// `{ "success": true, "data": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadEnvelope {
    /// Backend-level success flag; a 2xx reply may still carry `false`.
    pub success: bool,

    /// The screenplay, present when `success` is true.
    pub data: Option<Screenplay>,

    /// Backend-level failure description, present when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// A screenplay as returned by the read endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Screenplay {
    /// Opaque identifier of the screenplay.
    pub screenplay_id: String,

    /// Document content.
    #[serde(default)]
    pub content: Option<String>,

    /// Fields this client does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// JSON error body the backend attaches to non-2xx replies.
///
/// Every field is optional; billing replies (402) additionally carry
/// `required`/`current` credit amounts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorPayload {
    /// Machine-readable error code, e.g. "INSUFFICIENT_CREDITS".
    pub error: Option<String>,

    /// Developer-facing message.
    pub message: Option<String>,

    /// End-user-facing message, preferred for display when present.
    #[serde(rename = "userMessage")]
    pub user_message: Option<String>,

    /// Credits the operation would need.
    pub required: Option<f64>,

    /// Credits the account currently has.
    pub current: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_success_shape() {
        let raw = r#"{
            "success": true,
            "data": {
                "screenplay_id": "sp_42",
                "content": "FADE IN:",
                "title": "Draft One"
            }
        }"#;
        let envelope: ReadEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        let screenplay = envelope.data.unwrap();
        assert_eq!(screenplay.screenplay_id, "sp_42");
        assert_eq!(screenplay.content.as_deref(), Some("FADE IN:"));
        assert_eq!(
            screenplay.extra.get("title").and_then(|v| v.as_str()),
            Some("Draft One")
        );
    }

    #[test]
    fn error_payload_parses_billing_shape() {
        let raw = r#"{
            "error": "INSUFFICIENT_CREDITS",
            "message": "Need 50 credits, have 10",
            "userMessage": "You need more credits to continue.",
            "required": 50,
            "current": 10
        }"#;
        let payload: ErrorPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.error.as_deref(), Some("INSUFFICIENT_CREDITS"));
        assert_eq!(payload.required, Some(50.0));
        assert_eq!(payload.current, Some(10.0));
        assert_eq!(
            payload.user_message.as_deref(),
            Some("You need more credits to continue.")
        );
    }

    #[test]
    fn error_payload_tolerates_unknown_shape() {
        let payload: ErrorPayload = serde_json::from_str(r#"{"detail": "boom"}"#).unwrap();
        assert!(payload.error.is_none());
        assert!(payload.message.is_none());
    }
}
