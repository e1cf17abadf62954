//! Error classification.

use std::error::Error as StdError;

use crate::client::types::ErrorPayload;
use crate::credits::types::CreditErrorInfo;
use crate::error::ReadError;

/// HTTP status the backend uses for billing rejections.
const PAYMENT_REQUIRED: u16 = 402;

/// Text marker used by older backend revisions that signaled billing
/// failures through plain error strings instead of a 402 body.
const LEGACY_MARKER: &str = "INSUFFICIENT_CREDITS";

/// Fallback display string when the backend supplied no message at all.
const GENERIC_MESSAGE: &str = "Not enough credits to complete this action.";

/// Classify a caught error for billing significance.
///
/// Structured extraction runs first: a [`ReadError::Http`] with status 402
/// yields a full `CreditErrorInfo` lifted from the JSON body. Errors with
/// no structured body fall back to substring matching on their text
/// (legacy signaling). Anything else classifies as not-a-credit-error.
pub fn extract_credit_error(error: &(dyn StdError + 'static)) -> CreditErrorInfo {
    if let Some(ReadError::Http { status, payload }) = error.downcast_ref::<ReadError>() {
        if *status == PAYMENT_REQUIRED {
            return CreditErrorInfo {
                insufficient_credits: true,
                required: payload.required,
                current: payload.current,
                message: resolve_display_message(payload),
            };
        }
    }

    if error.to_string().contains(LEGACY_MARKER) {
        return CreditErrorInfo {
            insufficient_credits: true,
            required: None,
            current: None,
            message: GENERIC_MESSAGE.to_string(),
        };
    }

    CreditErrorInfo {
        insufficient_credits: false,
        required: None,
        current: None,
        message: error.to_string(),
    }
}

/// Boolean-only view of [`extract_credit_error`].
pub fn is_insufficient_credits_error(error: &(dyn StdError + 'static)) -> bool {
    extract_credit_error(error).insufficient_credits
}

/// Priority chain for the canonical display string:
/// `userMessage`, then `message`, then the generic fallback.
pub fn resolve_display_message(payload: &ErrorPayload) -> String {
    payload
        .user_message
        .clone()
        .or_else(|| payload.message.clone())
        .unwrap_or_else(|| GENERIC_MESSAGE.to_string())
}
