//! Publish pipeline metrics.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Backend attempts by backend and outcome.
    pub const PUBLISH_ATTEMPTS_TOTAL: &str = "vpub_publish_attempts_total";

    /// End-to-end publish duration in seconds, retries included.
    pub const PUBLISH_DURATION_SECONDS: &str = "vpub_publish_duration_seconds";
}

/// Record the outcome of one backend attempt.
pub fn record_attempt(backend: &str, outcome: &str) {
    counter!(
        names::PUBLISH_ATTEMPTS_TOTAL,
        "backend" => backend.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a finished publish.
pub fn record_publish_duration(backend: &str, success: bool, duration_secs: f64) {
    histogram!(
        names::PUBLISH_DURATION_SECONDS,
        "backend" => backend.to_string(),
        "success" => success.to_string()
    )
    .record(duration_secs);
}
