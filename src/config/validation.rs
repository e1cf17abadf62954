//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold ≥ 1, cooldown and timeouts > 0)
//! - Check the backend base URL actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::GuardConfig;

/// A single semantic violation found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. "breaker.failure_threshold".
    pub field: String,
    /// What is wrong with it.
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a deserialized config, collecting every violation.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.backend.base_url) {
        Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError {
            field: "backend.base_url".into(),
            reason: format!("'{}' cannot be used as a base URL", config.backend.base_url),
        }),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError {
            field: "backend.base_url".into(),
            reason: format!("'{}' is not a valid URL: {}", config.backend.base_url, e),
        }),
    }

    if config.backend.read_path.is_empty() {
        errors.push(ValidationError {
            field: "backend.read_path".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.breaker.failure_threshold == 0 {
        errors.push(ValidationError {
            field: "breaker.failure_threshold".into(),
            reason: "must be at least 1".into(),
        });
    }

    if config.breaker.cooldown_ms == 0 {
        errors.push(ValidationError {
            field: "breaker.cooldown_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    if config.timeouts.connect_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "timeouts.connect_timeout_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    if config.timeouts.request_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_timeout_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
