//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("numeric segment pattern is valid"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics")
            .field("path", &self.path)
            .finish()
    }
}

/// Initialize Prometheus metrics
///
/// Installing the global recorder can only succeed once per process; later
/// calls log the failure and return `None`.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("rental_comps_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            let path = config.route();
            tracing::info!("Prometheus metrics initialized at {}", path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path,
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record one provider call attempt (listings or geocoding)
pub fn record_provider_request(provider: &str, success: bool, duration: Duration) {
    let labels = [
        ("provider", provider.to_string()),
        ("status", if success { "success" } else { "error" }.to_string()),
    ];

    counter!("provider_requests_total", &labels).increment(1);
    histogram!("provider_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

pub fn record_provider_retry(provider: &str) {
    counter!("provider_retries_total", "provider" => provider.to_string()).increment(1);
}

pub fn record_mock_fallback(provider: &str) {
    counter!("listings_mock_fallbacks_total", "provider" => provider.to_string()).increment(1);
}

/// Record a cache lookup against one of the named caches
pub fn record_cache_lookup(cache: &str, hit: bool) {
    let labels = [
        ("cache", cache.to_string()),
        ("result", if hit { "hit" } else { "miss" }.to_string()),
    ];

    counter!("cache_lookups_total", &labels).increment(1);
}

/// Record the outcome of one comps pipeline run
pub fn record_comps_result(source: &str, candidates: usize, matches: usize) {
    let labels = [("source", source.to_string())];

    counter!("comps_requests_total", &labels).increment(1);
    histogram!("comps_candidates", &labels).record(candidates as f64);
    histogram!("comps_matches", &labels).record(matches as f64);

    if matches == 0 {
        counter!("comps_empty_results_total", &labels).increment(1);
    }
}

/// Sanitize URL path for metric labels (limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = NUMERIC_SEGMENT.replace_all(path, "/{id}$1");

    if path.len() > 50 {
        path.chars().take(50).collect()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/api/v1/items/123/detail"), "/api/v1/items/{id}/detail");
        assert_eq!(sanitize_path("/api/v1/items/123"), "/api/v1/items/{id}");
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/api/v1/comps"), "/api/v1/comps");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).len() <= 50);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_metrics(&config).is_none());
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_provider_request("rentcast", true, Duration::from_millis(10));
        record_provider_retry("rentcast");
        record_cache_lookup("listings", false);
        record_comps_result("provider", 10, 0);
    }
}
