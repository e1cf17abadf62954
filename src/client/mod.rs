//! Guarded client for the remote read endpoint.
//!
//! # Data Flow
//! ```text
//! caller
//!     → reader.rs (breaker gate → coalescer → HTTP GET with bearer auth)
//!     → types.rs (JSON envelope → Screenplay, error body → ErrorPayload)
//!     → token.rs (auth token acquired per underlying attempt)
//! ```
//!
//! # Design Decisions
//! - The reader owns one breaker and one in-flight table; independent
//!   readers are fully isolated, which keeps tests deterministic
//! - Breaker outcomes are recorded once per underlying network attempt,
//!   never once per coalesced waiter
//! - The original error of an attempt propagates verbatim; only suppressed
//!   attempts see the synthetic circuit-open error

pub mod reader;
pub mod token;
pub mod types;

pub use reader::ScreenplayReader;
pub use token::{NoToken, StaticToken, TokenFn, TokenProvider};
pub use types::{ErrorPayload, ReadEnvelope, Screenplay};
