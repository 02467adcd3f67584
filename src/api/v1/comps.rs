//! Comps endpoint handlers

use axum::extract::State;
use tracing::{debug, info};
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CompsRequest, Json};
use crate::domain::CompsResponse;
use crate::infrastructure::services::CompsCacheStats;

/// POST /api/v1/comps
pub async fn find_comps(
    State(state): State<AppState>,
    Json(request): Json<CompsRequest>,
) -> Result<Json<CompsResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    debug!(
        address = ?request.address,
        latitude = ?request.latitude,
        longitude = ?request.longitude,
        "Finding comps"
    );

    let response = state
        .comps_service
        .find_comps(request.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(response))
}

/// GET /api/v1/cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CompsCacheStats> {
    Json(state.comps_service.cache_stats().await)
}

/// DELETE /api/v1/cache - empties both caches and returns the resulting stats
pub async fn clear_caches(State(state): State<AppState>) -> Json<CompsCacheStats> {
    state.comps_service.clear_caches().await;
    info!("Geocode and listings caches cleared");

    Json(state.comps_service.cache_stats().await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::api::state::{ListingsMode, ProviderStatus};
    use crate::api::v1::create_v1_router;
    use crate::domain::{DomainError, InputSummary, ListingSource, ResponseMeta};
    use crate::infrastructure::cache::CacheStats;
    use crate::infrastructure::services::MockCompsServiceTrait;

    use super::*;

    fn app(service: MockCompsServiceTrait) -> Router {
        let state = AppState::new(
            Arc::new(service),
            ProviderStatus {
                listings: ListingsMode::Live,
                geocoding_enabled: true,
            },
        );

        create_v1_router().with_state(state)
    }

    fn sample_response() -> CompsResponse {
        CompsResponse {
            input: InputSummary {
                resolved_address: "Location at 26.1224, -80.1373".to_string(),
                latitude: 26.1224,
                longitude: -80.1373,
                bedrooms: Some(2),
                bathrooms: None,
                radius_miles: 5.0,
                days_old: "*:270".to_string(),
            },
            comps: vec![],
            meta: ResponseMeta {
                source: ListingSource::Provider,
                total_candidates: 0,
                total_matches: 0,
            },
        }
    }

    fn post_comps(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/comps")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_find_comps_returns_envelope() {
        let mut service = MockCompsServiceTrait::new();
        service
            .expect_find_comps()
            .withf(|lookup| lookup.latitude == Some(26.1224) && lookup.bedrooms == Some(2))
            .times(1)
            .returning(|_| Ok(sample_response()));

        let response = app(service)
            .oneshot(post_comps(
                r#"{"latitude": 26.1224, "longitude": -80.1373, "bedrooms": 2}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meta"]["source"], "provider");
        assert_eq!(json["input"]["days_old"], "*:270");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let mut service = MockCompsServiceTrait::new();
        service.expect_find_comps().times(0);

        let response = app(service)
            .oneshot(post_comps(r#"{"latitude": "north""#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "422_VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_zero_radius_is_validation_error() {
        let mut service = MockCompsServiceTrait::new();
        service.expect_find_comps().times(0);

        let response = app(service)
            .oneshot(post_comps(
                r#"{"latitude": 26.1, "longitude": -80.1, "radius_miles": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_domain_errors_map_to_envelope() {
        let mut service = MockCompsServiceTrait::new();
        service.expect_find_comps().returning(|_| {
            Err(DomainError::invalid_input(
                "Must provide either address or latitude & longitude",
            ))
        });

        let response = app(service).oneshot(post_comps("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "400_INVALID_INPUT");
        assert_eq!(
            json["message"],
            "Must provide either address or latitude & longitude"
        );
    }

    #[tokio::test]
    async fn test_rate_limited_maps_to_429() {
        let mut service = MockCompsServiceTrait::new();
        service
            .expect_find_comps()
            .returning(|_| Err(DomainError::rate_limited("Too many requests")));

        let response = app(service)
            .oneshot(post_comps(r#"{"latitude": 26.1, "longitude": -80.1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let stats = |size| CacheStats {
            size,
            max_capacity: 1000,
            ttl_seconds: 600,
            hits: 1,
            misses: 2,
        };
        let mut service = MockCompsServiceTrait::new();
        service.expect_cache_stats().returning(move || CompsCacheStats {
            geocode: stats(3),
            listings: stats(4),
        });

        let response = app(service)
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["geocode"]["size"], 3);
        assert_eq!(json["listings"]["ttl_seconds"], 600);
    }

    #[tokio::test]
    async fn test_clear_caches_then_reports_stats() {
        let mut seq = mockall::Sequence::new();
        let mut service = MockCompsServiceTrait::new();
        service
            .expect_clear_caches()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        service
            .expect_cache_stats()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let empty = CacheStats {
                    size: 0,
                    max_capacity: 1000,
                    ttl_seconds: 600,
                    hits: 0,
                    misses: 0,
                };
                CompsCacheStats {
                    geocode: empty.clone(),
                    listings: empty,
                }
            });

        let response = app(service)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["listings"]["size"], 0);
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let response = app(MockCompsServiceTrait::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "rental-comps");
    }
}
