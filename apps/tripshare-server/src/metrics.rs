//! Prometheus metrics for tripshare-server.
//!
//! Exposes server metrics in Prometheus format at the `/metrics` endpoint.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

/// Install the Prometheus recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(
        "tripshare_http_requests_total",
        "Total number of HTTP requests processed"
    );
    describe_histogram!(
        "tripshare_http_request_duration_seconds",
        "Duration of HTTP requests in seconds"
    );
    describe_counter!(
        "tripshare_access_denied_total",
        "Requests refused by the access policy, by requirement"
    );
    describe_counter!(
        "tripshare_invitation_redemptions_total",
        "Invitation redemption attempts by outcome"
    );
}

pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    counter!(
        "tripshare_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "tripshare_http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Times a request from creation until [`RequestTimer::finish`].
pub struct RequestTimer {
    method: String,
    route: String,
    start: Instant,
}

impl RequestTimer {
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
            start: Instant::now(),
        }
    }

    pub fn finish(self, status: u16) {
        record_http_request(&self.method, &self.route, status, self.start.elapsed());
    }
}

/// Route-level middleware. Labels by the matched route template so ids don't explode
/// the label set.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let timer = RequestTimer::new(req.method().as_str(), route);

    let response = next.run(req).await;
    timer.finish(response.status().as_u16());
    response
}
