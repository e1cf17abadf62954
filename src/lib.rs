//! Resilient remote-read client library.
//!
//! Wraps a single logical read operation (fetch a screenplay by id from the
//! backend API) with two protections layered on top of the plain HTTP call:
//!
//! - in-flight request coalescing: concurrent callers for the same key share
//!   exactly one underlying network call
//! - a per-key circuit breaker: after repeated failures the key fails fast
//!   with a "temporarily unavailable" error until a cooldown elapses
//!
//! A secondary helper, [`credits`], classifies billing errors (HTTP 402 or
//! the legacy `INSUFFICIENT_CREDITS` text marker) into a structure UI code
//! can branch on without parsing raw error bodies.

pub mod client;
pub mod config;
pub mod credits;
pub mod error;
pub mod observability;
pub mod resilience;

pub use client::reader::ScreenplayReader;
pub use client::token::{StaticToken, TokenProvider};
pub use client::types::Screenplay;
pub use config::GuardConfig;
pub use credits::{extract_credit_error, is_insufficient_credits_error, CreditErrorInfo};
pub use error::{ReadError, ReadResult};
