//! Versioned comps API endpoints

pub mod comps;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::health;
use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/comps", post(comps::find_comps))
        .route("/health", get(health::health_check))
        .route("/cache/stats", get(comps::cache_stats))
        .route("/cache", delete(comps::clear_caches))
}
