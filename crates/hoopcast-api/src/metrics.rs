//! Prometheus metrics for the API server.

use std::time::Duration;
use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use hoopcast_clients::Collaborator;
use hoopcast_commentary::TrimOutcome;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "hoopcast_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "hoopcast_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "hoopcast_http_requests_in_flight";

    // Collaborator metrics
    pub const UPSTREAM_CALLS_TOTAL: &str = "hoopcast_upstream_calls_total";
    pub const UPSTREAM_CALL_DURATION_SECONDS: &str = "hoopcast_upstream_call_duration_seconds";

    // Commentary metrics
    pub const COMMENTARY_TRIM_TOTAL: &str = "hoopcast_commentary_trim_total";
    pub const COMMENTARY_WORDS: &str = "hoopcast_commentary_words";
    pub const SPEECH_DEGRADED_TOTAL: &str = "hoopcast_speech_degraded_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "hoopcast_rate_limit_hits_total";
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

/// Record one call to an external collaborator.
pub fn record_upstream_call(collaborator: Collaborator, success: bool, elapsed: Duration) {
    let labels = [
        ("collaborator", collaborator.as_str().to_string()),
        ("outcome", if success { "ok" } else { "error" }.to_string()),
    ];
    counter!(names::UPSTREAM_CALLS_TOTAL, &labels).increment(1);
    histogram!(names::UPSTREAM_CALL_DURATION_SECONDS, &labels).record(elapsed.as_secs_f64());
}

/// Record how a generated commentary was fitted to its word budget.
pub fn record_trim(outcome: TrimOutcome, word_count: usize) {
    let labels = [("outcome", outcome.as_str().to_string())];
    counter!(names::COMMENTARY_TRIM_TOTAL, &labels).increment(1);
    histogram!(names::COMMENTARY_WORDS).record(word_count as f64);
}

/// Record a pipeline run that returned text because speech failed.
pub fn record_speech_degraded() {
    counter!(names::SPEECH_DEGRADED_TOTAL).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Route template for a request, so ids in query strings or unknown paths
/// never become label values.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = route_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
