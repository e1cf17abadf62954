//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Guarded read for key K:
//!     → breaker.rs (is the circuit for K open? fail fast if so)
//!     → coalesce.rs (join an in-flight read for K, or start one)
//!     → underlying HTTP call
//!     → on settlement: breaker records success/failure, once per attempt
//! ```
//!
//! # Design Decisions
//! - The breaker gates attempts; it never retries on the caller's behalf
//! - Coalescing is transparent: it introduces no new error kind, it only
//!   fans the same outcome out to every concurrent waiter
//! - Both components are I/O-free; the only suspension point is the
//!   wrapped network call itself

pub mod breaker;
pub mod coalesce;

pub use breaker::{CircuitBreaker, CircuitSnapshot};
pub use coalesce::InFlightTable;
