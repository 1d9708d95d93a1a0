//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Record per-route request counts and latency
//! - Expose a Prometheus-compatible scrape endpoint when enabled
//!
//! # Metrics
//! - `taskhub_requests_total` (counter): requests by method, route, status
//! - `taskhub_request_duration_seconds` (histogram): latency by method, route
//!
//! # Design Decisions
//! - Labels use the matched route template (`/projects/{project_id}`), never
//!   the raw path, so label cardinality stays bounded
//! - Without an installed exporter the `metrics` macros are no-ops

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "taskhub_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "taskhub_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Route middleware recording every matched request.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start_time);
    response
}
