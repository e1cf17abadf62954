//! Metrics collection.
//!
//! # Responsibilities
//! - Define guard metrics (read outcomes, coalesced joins, circuit events)
//! - Record through the `metrics` facade; the embedding application owns
//!   the recorder/exporter
//!
//! # Metrics
//! - `read_guard_reads_total` (counter): reads by outcome
//!   (success, failure, circuit_rejected)
//! - `read_guard_coalesced_joins_total` (counter): callers that attached to
//!   an already in-flight read instead of issuing their own
//! - `read_guard_circuit_transitions_total` (counter): opened/closed events
//! - `read_guard_open_circuits` (gauge): circuits currently open

use metrics::{counter, gauge};

/// Record the outcome of one read attempt as seen by a caller.
pub fn record_read_outcome(outcome: &'static str) {
    counter!("read_guard_reads_total", "outcome" => outcome).increment(1);
}

/// Record a caller joining an already in-flight read.
pub fn record_coalesced_join(key: &str) {
    counter!("read_guard_coalesced_joins_total", "key" => key.to_string()).increment(1);
}

/// Record a circuit opening for a key.
pub fn record_circuit_opened(key: &str) {
    counter!("read_guard_circuit_transitions_total", "transition" => "opened", "key" => key.to_string())
        .increment(1);
    gauge!("read_guard_open_circuits").increment(1.0);
}

/// Record a circuit closing (success after failures).
pub fn record_circuit_closed(key: &str) {
    counter!("read_guard_circuit_transitions_total", "transition" => "closed", "key" => key.to_string())
        .increment(1);
    gauge!("read_guard_open_circuits").decrement(1.0);
}
