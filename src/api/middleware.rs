//! Request logging and HTTP metrics

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::infrastructure::observability::record_http_request;

/// Log each request and record its latency and status.
///
/// Runs inside `TraceLayer`, so it adds events to the existing span rather
/// than opening its own.
pub async fn observe_request(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_path(&request);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    record_http_request(method.as_str(), &path, status, duration);

    if status >= 500 {
        warn!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis() as u64,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    }

    response
}

/// Matched route pattern when available, for bounded label cardinality
fn route_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
