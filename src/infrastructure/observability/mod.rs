//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_cache_lookup, record_comps_result,
    record_http_request, record_mock_fallback, record_provider_request, record_provider_retry,
    PrometheusMetrics,
};
