use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health;
use super::middleware::observe_request;
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state.
///
/// The Prometheus scrape route is merged after the state is applied so it
/// stays outside the API prefix and is not itself counted as API traffic.
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let api = Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", v1::create_v1_router())
        .with_state(state)
        .layer(from_fn(observe_request));

    let router = match metrics {
        Some(metrics) => api.merge(create_metrics_router(metrics)),
        None => api,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
