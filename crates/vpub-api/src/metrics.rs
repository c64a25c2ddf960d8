//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vpub_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vpub_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vpub_http_requests_in_flight";

    // Upload metrics
    pub const UPLOADS_TOTAL: &str = "vpub_uploads_total";
    pub const CONTENT_SYNTHESIZED_TOTAL: &str = "vpub_content_synthesized_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "vpub_rate_limit_hits_total";
}

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a finished upload. `media` is `file` or `url`, `outcome` is
/// `published`, `invalid` or `failed`.
pub fn record_upload(media: &str, outcome: &str) {
    let labels = [
        ("media", media.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::UPLOADS_TOTAL, &labels).increment(1);
}

/// Record one synthesis. `category` must be a catalog key so label
/// cardinality stays bounded.
pub fn record_content_synthesized(category: &str, fallback: bool) {
    let labels = [
        ("category", category.to_string()),
        ("fallback", fallback.to_string()),
    ];
    counter!(names::CONTENT_SYNTHESIZED_TOTAL, &labels).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Metrics middleware for HTTP requests.
///
/// Paths are labelled with the matched route template so scanners hitting
/// random URLs cannot inflate label cardinality.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
