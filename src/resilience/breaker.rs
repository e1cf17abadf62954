//! Per-key circuit breaker.
//!
//! # States
//! - Closed: normal operation, attempts pass through
//! - Open: key assumed unavailable, attempts fail fast until the cooldown
//!   deadline passes
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive_failures >= failure_threshold
//! Open → Closed: now >= opened_until (next attempt is allowed through)
//! any → Closed: a recorded success resets the slot
//! ```
//!
//! # Design Decisions
//! - Per-key circuit, not global: one failing screenplay must not gate reads
//!   of unrelated ones
//! - Fail fast while open; suppressed attempts mutate no state
//! - No half-open probe state: once the deadline passes the next attempt is
//!   simply allowed, and a failure re-opens immediately because the count
//!   is still at threshold
//! - Slots are created lazily on first failure and never garbage-collected;
//!   cardinality is bounded by the resources a session touches

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::schema::BreakerConfig;
use crate::observability::metrics;

/// Failure-tracking state for one key.
#[derive(Debug, Clone, Default)]
struct CircuitSlot {
    consecutive_failures: u32,
    opened_until: Option<Instant>,
}

/// Debug/test view of one key's circuit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitSnapshot {
    /// Consecutive failure count.
    pub consecutive_failures: u32,
    /// Deadline the circuit stays open until, if open.
    pub opened_until: Option<Instant>,
}

impl CircuitSnapshot {
    /// True if the circuit is open as of `now`.
    pub fn is_open(&self) -> bool {
        self.opened_until.is_some_and(|until| Instant::now() < until)
    }
}

/// A keyed circuit breaker.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    slots: Arc<DashMap<String, CircuitSlot>>,
    failure_threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    /// Create a breaker from config.
    pub fn new(config: &BreakerConfig) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            failure_threshold: config.failure_threshold,
            cooldown: Duration::from_millis(config.cooldown_ms),
        }
    }

    /// Should an attempt for `key` be permitted right now?
    ///
    /// Read-only: calls suppressed while open do not mutate the slot.
    pub fn should_allow(&self, key: &str) -> bool {
        match self.slots.get(key) {
            Some(slot) => match slot.opened_until {
                Some(until) => Instant::now() >= until,
                None => true,
            },
            None => true,
        }
    }

    /// Record a successful attempt: reset the failure count and close the
    /// circuit.
    pub fn record_success(&self, key: &str) {
        if let Some((_, slot)) = self.slots.remove(key) {
            tracing::debug!(key, "failure count reset after success");
            if slot.opened_until.is_some() {
                metrics::record_circuit_closed(key);
            }
        }
    }

    /// Record a failed attempt. Returns true if this failure opened (or
    /// re-opened) the circuit.
    pub fn record_failure(&self, key: &str) -> bool {
        let mut slot = self.slots.entry(key.to_string()).or_default();
        slot.consecutive_failures += 1;

        if slot.consecutive_failures >= self.failure_threshold {
            let newly_opened = slot.opened_until.is_none();
            slot.opened_until = Some(Instant::now() + self.cooldown);
            tracing::warn!(
                key,
                failures = slot.consecutive_failures,
                cooldown_ms = self.cooldown.as_millis() as u64,
                "circuit opened"
            );
            if newly_opened {
                metrics::record_circuit_opened(key);
            }
            true
        } else {
            false
        }
    }

    /// Clear the state for one key.
    pub fn reset(&self, key: &str) {
        self.slots.remove(key);
    }

    /// Clear all state. Test/debug hook.
    pub fn reset_all(&self) {
        self.slots.clear();
    }

    /// Inspect the state for one key. Test/debug hook; `None` means the key
    /// has never failed (or was reset).
    pub fn snapshot(&self, key: &str) -> Option<CircuitSnapshot> {
        self.slots.get(key).map(|slot| CircuitSnapshot {
            consecutive_failures: slot.consecutive_failures,
            opened_until: slot.opened_until,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, cooldown_ms: u64) -> CircuitBreaker {
        CircuitBreaker::new(&BreakerConfig {
            failure_threshold: threshold,
            cooldown_ms,
        })
    }

    #[test]
    fn opens_after_threshold_failures() {
        let cb = breaker(3, 30_000);

        assert!(!cb.record_failure("sp_1"));
        assert!(!cb.record_failure("sp_1"));
        assert!(cb.should_allow("sp_1"));

        assert!(cb.record_failure("sp_1"));
        assert!(!cb.should_allow("sp_1"));

        let snap = cb.snapshot("sp_1").unwrap();
        assert_eq!(snap.consecutive_failures, 3);
        assert!(snap.is_open());
    }

    #[test]
    fn suppressed_calls_do_not_mutate_state() {
        let cb = breaker(3, 30_000);
        for _ in 0..3 {
            cb.record_failure("sp_1");
        }

        for _ in 0..10 {
            assert!(!cb.should_allow("sp_1"));
        }
        assert_eq!(cb.snapshot("sp_1").unwrap().consecutive_failures, 3);
    }

    #[test]
    fn success_closes_and_resets() {
        let cb = breaker(3, 30_000);
        for _ in 0..3 {
            cb.record_failure("sp_1");
        }
        assert!(!cb.should_allow("sp_1"));

        cb.record_success("sp_1");
        assert!(cb.should_allow("sp_1"));
        assert!(cb.snapshot("sp_1").is_none());
    }

    #[test]
    fn allows_again_after_cooldown() {
        let cb = breaker(1, 20);
        cb.record_failure("sp_1");
        assert!(!cb.should_allow("sp_1"));

        std::thread::sleep(Duration::from_millis(30));
        assert!(cb.should_allow("sp_1"));
    }

    #[test]
    fn failure_after_cooldown_reopens_immediately() {
        let cb = breaker(2, 20);
        cb.record_failure("sp_1");
        cb.record_failure("sp_1");
        std::thread::sleep(Duration::from_millis(30));
        assert!(cb.should_allow("sp_1"));

        // Count is still at threshold, so one failure re-opens.
        assert!(cb.record_failure("sp_1"));
        assert!(!cb.should_allow("sp_1"));
    }

    #[test]
    fn keys_are_independent() {
        let cb = breaker(1, 30_000);
        cb.record_failure("sp_1");
        assert!(!cb.should_allow("sp_1"));
        assert!(cb.should_allow("sp_2"));
    }

    #[test]
    fn reset_hooks_clear_state() {
        let cb = breaker(1, 30_000);
        cb.record_failure("sp_1");
        cb.record_failure("sp_2");

        cb.reset("sp_1");
        assert!(cb.should_allow("sp_1"));
        assert!(!cb.should_allow("sp_2"));

        cb.reset_all();
        assert!(cb.should_allow("sp_2"));
        assert!(cb.snapshot("sp_2").is_none());
    }
}
