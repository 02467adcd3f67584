//! Health and service banner endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::{AppState, ListingsMode};

const SERVICE_NAME: &str = "rental-comps";

/// Health response with component status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: &'static str,
    pub version: &'static str,
    pub checks: Vec<HealthCheck>,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual component health check
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Service health. Missing providers degrade the service but never fail the probe.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = vec![
        listings_check(state.providers.listings),
        geocoding_check(state.providers.geocoding_enabled),
    ];

    let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    (StatusCode::OK, Json(response))
}

/// Root banner
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Rental Comps API",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/api/v1/health",
        "comps": "/api/v1/comps",
    }))
}

fn listings_check(mode: ListingsMode) -> HealthCheck {
    match mode {
        ListingsMode::Live | ListingsMode::LiveWithFallback => HealthCheck {
            name: "listings",
            status: HealthStatus::Healthy,
            message: None,
        },
        ListingsMode::Synthetic => HealthCheck {
            name: "listings",
            status: HealthStatus::Degraded,
            message: Some("Listings provider not configured; serving synthetic listings"),
        },
    }
}

fn geocoding_check(enabled: bool) -> HealthCheck {
    if enabled {
        HealthCheck {
            name: "geocoding",
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        HealthCheck {
            name: "geocoding",
            status: HealthStatus::Degraded,
            message: Some("Geocoder not configured; only coordinate lookups are accepted"),
        }
    }
}
