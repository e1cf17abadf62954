//! Error definitions for the read guard.

use thiserror::Error;

use crate::client::types::ErrorPayload;

/// Errors surfaced by a guarded read.
///
/// `Clone` is required: one settled outcome is fanned out to every caller
/// coalesced onto the same in-flight request.
#[derive(Debug, Clone, Error)]
pub enum ReadError {
    /// The circuit for this key is open; no network call was attempted.
    /// The "temporarily unavailable" phrase is stable and matchable —
    /// callers distinguish circuit rejections from genuine failures by it.
    #[error("{resource} is temporarily unavailable, please retry shortly")]
    CircuitOpen {
        /// Human-readable name of the gated resource.
        resource: String,
    },

    /// The backend replied with a non-success HTTP status.
    #[error("backend returned status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Parsed JSON error body (all fields optional).
        payload: ErrorPayload,
    },

    /// The backend replied 2xx but the envelope carried `success: false`.
    #[error("backend rejected read: {message}")]
    Backend { message: String },

    /// Connection, timeout, or transfer failure before a reply arrived.
    /// Stored as a string because the underlying client error is not
    /// cloneable across coalesced waiters.
    #[error("request failed: {0}")]
    Transport(String),

    /// The reply body was not the expected JSON envelope.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The token provider returned no token.
    #[error("no auth token available")]
    Unauthenticated,
}

impl ReadError {
    /// True if this error is a synthetic circuit-breaker rejection rather
    /// than the outcome of a real attempt.
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, ReadError::CircuitOpen { .. })
    }
}

/// Result type for guarded reads.
pub type ReadResult<T> = Result<T, ReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_open_message_is_matchable() {
        let err = ReadError::CircuitOpen {
            resource: "screenplay sp_1".into(),
        };
        assert!(err.to_string().contains("temporarily unavailable"));
        assert!(err.is_circuit_open());
    }

    #[test]
    fn http_error_carries_status() {
        let err = ReadError::Http {
            status: 503,
            payload: ErrorPayload::default(),
        };
        assert!(err.to_string().contains("503"));
        assert!(!err.is_circuit_open());
    }
}
