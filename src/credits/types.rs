//! Credit-classification value objects.

/// Normalized result of classifying an error for billing significance.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditErrorInfo {
    /// True when the error means "the account is out of credits".
    pub insufficient_credits: bool,

    /// Credits the operation would need, when the backend said so.
    pub required: Option<f64>,

    /// Credits the account currently has, when the backend said so.
    pub current: Option<f64>,

    /// The best available human-readable string for display.
    pub message: String,
}

impl CreditErrorInfo {
    /// The resolved display string (already chosen by the priority chain
    /// `userMessage` → `message` → generic fallback).
    pub fn display_message(&self) -> &str {
        &self.message
    }
}
