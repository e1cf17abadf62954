//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reader / breaker / coalescer produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → the embedding application's subscriber and metrics recorder
//! ```
//!
//! # Design Decisions
//! - This is a library: it emits through the tracing/metrics facades and
//!   never installs an exporter of its own
//! - `init_logging` is a convenience for binaries and tests that have no
//!   subscriber yet; embedders with their own setup skip it
//! - Metric updates are cheap (atomic increments behind the facade)

pub mod logging;
pub mod metrics;
