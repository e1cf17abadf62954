//! The composed resilient read.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::client::token::TokenProvider;
use crate::client::types::{ErrorPayload, ReadEnvelope, Screenplay};
use crate::config::GuardConfig;
use crate::error::{ReadError, ReadResult};
use crate::observability::metrics;
use crate::resilience::breaker::{CircuitBreaker, CircuitSnapshot};
use crate::resilience::coalesce::InFlightTable;

/// Client for the "read screenplay by id" endpoint, guarded by in-flight
/// coalescing and a per-key circuit breaker.
///
/// Clones share the same breaker and in-flight state; construct separate
/// readers for isolated state (e.g. one per test).
#[derive(Clone)]
pub struct ScreenplayReader {
    http: reqwest::Client,
    read_url: Url,
    tokens: Arc<dyn TokenProvider>,
    breaker: CircuitBreaker,
    in_flight: InFlightTable<Screenplay>,
}

impl ScreenplayReader {
    /// Build a reader from validated config and a token source.
    pub fn new(config: &GuardConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ReadError> {
        let base = Url::parse(&config.backend.base_url)
            .map_err(|e| ReadError::Decode(format!("invalid base_url: {}", e)))?;
        // Trailing slash so Url::join appends instead of replacing the last
        // path segment.
        let read_url = base
            .join(&format!("{}/", config.backend.read_path.trim_matches('/')))
            .map_err(|e| ReadError::Decode(format!("invalid read_path: {}", e)))?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.timeouts.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeouts.request_timeout_ms))
            .build()
            .map_err(|e| ReadError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            read_url,
            tokens,
            breaker: CircuitBreaker::new(&config.breaker),
            in_flight: InFlightTable::new(),
        })
    }

    /// Read one screenplay by id.
    ///
    /// Step order: circuit gate first (an open circuit rejects without
    /// touching the coalescer or the network), then join-or-start the
    /// in-flight read. The underlying attempt records exactly one breaker
    /// outcome regardless of how many callers coalesced onto it, and its
    /// original error propagates verbatim to those callers.
    pub async fn read(&self, key: &str) -> ReadResult<Screenplay> {
        if !self.breaker.should_allow(key) {
            tracing::debug!(key, "read suppressed: circuit open");
            metrics::record_read_outcome("circuit_rejected");
            return Err(ReadError::CircuitOpen {
                resource: format!("screenplay {}", key),
            });
        }

        let perform = {
            let http = self.http.clone();
            let url = self.read_url.clone();
            let tokens = Arc::clone(&self.tokens);
            let breaker = self.breaker.clone();
            let key = key.to_string();
            move || async move {
                let result = fetch_screenplay(&http, &url, tokens.as_ref(), &key).await;
                match &result {
                    Ok(screenplay) => {
                        tracing::debug!(key = %key, screenplay_id = %screenplay.screenplay_id, "read ok");
                        metrics::record_read_outcome("success");
                        breaker.record_success(&key);
                    }
                    Err(err) => {
                        tracing::warn!(key = %key, error = %err, "read failed");
                        metrics::record_read_outcome("failure");
                        breaker.record_failure(&key);
                    }
                }
                result
            }
        };

        self.in_flight.get_or_create(key, perform).await
    }

    /// Number of reads currently in flight across all keys.
    pub fn in_flight_reads(&self) -> usize {
        self.in_flight.len()
    }

    /// Inspect the circuit state for one key. Test/debug hook.
    pub fn circuit_snapshot(&self, key: &str) -> Option<CircuitSnapshot> {
        self.breaker.snapshot(key)
    }

    /// Clear the circuit state for one key. Test/debug hook.
    pub fn reset_circuit(&self, key: &str) {
        self.breaker.reset(key);
    }

    /// Clear all circuit state. Test/debug hook.
    pub fn reset_all_circuits(&self) {
        self.breaker.reset_all();
    }
}

/// One underlying network attempt: acquire a token, GET the resource,
/// map the reply onto the success envelope or an error.
async fn fetch_screenplay(
    http: &reqwest::Client,
    read_url: &Url,
    tokens: &dyn TokenProvider,
    key: &str,
) -> ReadResult<Screenplay> {
    let token = tokens
        .bearer_token()
        .await
        .ok_or(ReadError::Unauthenticated)?;

    let url = read_url
        .join(key)
        .map_err(|e| ReadError::Decode(format!("invalid read key '{}': {}", key, e)))?;

    let response = http
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| ReadError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let payload = parse_error_payload(response).await;
        return Err(ReadError::Http {
            status: status.as_u16(),
            payload,
        });
    }

    let envelope: ReadEnvelope = response
        .json()
        .await
        .map_err(|e| ReadError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ReadError::Backend {
            message: envelope
                .message
                .unwrap_or_else(|| "unspecified backend failure".to_string()),
        });
    }

    envelope.data.ok_or_else(|| {
        ReadError::Decode("success envelope without a data field".to_string())
    })
}

/// Best-effort parse of a non-2xx body. A body that is not the expected
/// JSON shape degrades to an empty payload rather than masking the HTTP
/// status with a decode error.
async fn parse_error_payload(response: reqwest::Response) -> ErrorPayload {
    debug_assert!(!response.status().is_success());
    response.json().await.unwrap_or_default()
}
