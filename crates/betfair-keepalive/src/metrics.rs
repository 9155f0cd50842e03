//! Keep-alive metrics
//!
//! Emitted through the `metrics` facade; a binary decides where they go.
//!
//! - `keepalive_requests_total` (counter): label `outcome`
//! - `keepalive_request_duration_seconds` (histogram): label `outcome`

use crate::error::FailureKind;

pub const REQUESTS_TOTAL: &str = "keepalive_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "keepalive_request_duration_seconds";

/// Outcome label for a successful call.
pub const SUCCESS_OUTCOME: &str = "success";

/// Count one call. Duration is recorded only when a response came back.
pub fn record_outcome(outcome: &'static str, elapsed_secs: Option<f64>) {
    metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    if let Some(secs) = elapsed_secs {
        metrics::histogram!(REQUEST_DURATION_SECONDS, "outcome" => outcome).record(secs);
    }
}

pub fn record_failure(kind: FailureKind, elapsed_secs: Option<f64>) {
    record_outcome(kind.as_str(), elapsed_secs);
}
