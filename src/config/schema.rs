//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the guard.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the read guard.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Remote backend endpoint settings.
    pub backend: BackendConfig,

    /// Circuit breaker tuning.
    pub breaker: BreakerConfig,

    /// Timeout configuration for outbound calls.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// API root, e.g. "https://api.example.com/api/v1/".
    pub base_url: String,

    /// Path segment of the read endpoint, joined as `{read_path}/{key}`.
    pub read_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api/v1/".to_string(),
            read_path: "screenplays".to_string(),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures for a key before its circuit opens.
    pub failure_threshold: u32,

    /// How long the circuit stays open before calls are allowed again.
    pub cooldown_ms: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown_ms: 30_000,
        }
    }
}

/// Timeout configuration.
///
/// Every external call has a deadline; timeouts are enforced by the HTTP
/// client, not by the breaker.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// TCP connect timeout.
    pub connect_timeout_ms: u64,

    /// Whole-request timeout (connect + transfer + body).
    pub request_timeout_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 2_000,
            request_timeout_ms: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set.
    pub log_level: String,

    /// "pretty" for development, "json" for production.
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
