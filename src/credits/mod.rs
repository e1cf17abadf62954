//! Billing-error classification.
//!
//! # Responsibilities
//! - Normalize heterogeneous "insufficient credits" error shapes into one
//!   structured value, so UI code never parses raw HTTP error bodies
//! - Keep the structured (HTTP 402) and legacy (text marker) detection
//!   paths explicit and separately testable
//!
//! # Design Decisions
//! - Pure projection: no I/O, no side effects, no error of its own
//! - Structured extraction is attempted first; substring matching on the
//!   error's text runs only when no structured body is available

pub mod classify;
pub mod types;

pub use classify::{extract_credit_error, is_insufficient_credits_error, resolve_display_message};
pub use types::CreditErrorInfo;
