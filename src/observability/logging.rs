//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries/tests that lack one
//! - JSON format for production, pretty format for development
//! - Level configurable via config, overridable with RUST_LOG

use tracing_subscriber::EnvFilter;

use crate::config::schema::ObservabilityConfig;

/// Install a global subscriber. Safe to call more than once; later calls
/// are no-ops because a global default is already set.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("subscriber already installed, keeping existing one");
    }
}
