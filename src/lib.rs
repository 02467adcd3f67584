//! Rental Comps API
//!
//! Finds comparable long-term rental listings around a subject property:
//! - Address geocoding or raw coordinates
//! - Radius, recency and bed/bath filtering with distance ranking
//! - Bounded retries, rate limiting and TTL caching for upstream providers
//! - Synthetic listings when the listings provider is unavailable

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use api::state::{AppState, ListingsMode, ProviderStatus};
use domain::{Geocoder, ListingsProvider};
use infrastructure::{
    cache::{TtlCache, TtlCacheConfig},
    geocoding::{GeocodeCache, LocationResolver, OpenCageGeocoder},
    http_client::HttpClient,
    listings::{ListingsBackend, ListingsCache, ListingsGateway, MockListingsGenerator, RentCastProvider},
    rate_limit::RateLimiter,
    services::CompsService,
};

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let client = HttpClient::with_timeout(Duration::from_secs(config.providers.http_timeout_secs))?;

    let (backend, listings_mode) = create_listings_backend(config, &client)?;
    info!(backend = backend.name(), mode = ?listings_mode, "Listings backend configured");

    let listings_cache: Arc<ListingsCache> = Arc::new(TtlCache::new(
        "listings",
        TtlCacheConfig::default()
            .with_max_capacity(config.comps.cache_max_capacity)
            .with_default_ttl(Duration::from_secs(config.comps.cache_ttl_secs)),
    ));
    let geocode_cache: Arc<GeocodeCache> = Arc::new(TtlCache::new(
        "geocode",
        TtlCacheConfig::default()
            .with_max_capacity(config.comps.geocode_cache_max_capacity)
            .with_default_ttl(Duration::from_secs(config.comps.geocode_cache_ttl_secs)),
    ));

    let resolver = match create_geocoder(config, &client) {
        Some(geocoder) => LocationResolver::new(geocoder, geocode_cache),
        None => {
            warn!("OpenCage API key not set; address lookups are disabled");
            LocationResolver::without_geocoder(geocode_cache)
        }
    };
    let geocoding_enabled = resolver.has_geocoder();

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let gateway = ListingsGateway::new(backend, listings_cache, limiter, config.retry.clone());

    let service = CompsService::new(
        Arc::new(resolver),
        Arc::new(gateway),
        config.comps.service_config()?,
    );

    Ok(AppState::new(
        Arc::new(service),
        ProviderStatus {
            listings: listings_mode,
            geocoding_enabled,
        },
    ))
}

fn create_listings_backend(
    config: &AppConfig,
    client: &HttpClient,
) -> anyhow::Result<(ListingsBackend, ListingsMode)> {
    let rentcast = &config.providers.rentcast;
    let fallback = config.comps.mock_fallback;

    let provider: Option<Arc<dyn ListingsProvider>> = rentcast.api_key().map(|key| {
        let provider = match &rentcast.url {
            Some(url) => RentCastProvider::with_url(client.clone(), key, url.clone()),
            None => RentCastProvider::new(client.clone(), key),
        };
        Arc::new(provider) as Arc<dyn ListingsProvider>
    });
    let generator: Arc<dyn ListingsProvider> =
        Arc::new(MockListingsGenerator::new(config.comps.mock_seed));

    match (provider, fallback) {
        (Some(provider), true) => Ok((
            ListingsBackend::live_with_fallback(provider, generator),
            ListingsMode::LiveWithFallback,
        )),
        (Some(provider), false) => Ok((ListingsBackend::live(provider), ListingsMode::Live)),
        (None, true) => {
            warn!("RentCast API key not set; serving synthetic listings");
            Ok((ListingsBackend::synthetic(generator), ListingsMode::Synthetic))
        }
        (None, false) => Err(anyhow::anyhow!(
            "providers.rentcast.api_key is required when comps.mock_fallback is disabled"
        )),
    }
}

fn create_geocoder(config: &AppConfig, client: &HttpClient) -> Option<Arc<dyn Geocoder>> {
    let opencage = &config.providers.opencage;
    let key = opencage.api_key()?;

    let geocoder = match &opencage.url {
        Some(url) => OpenCageGeocoder::with_url(client.clone(), key, url.clone()),
        None => OpenCageGeocoder::new(client.clone(), key),
    };

    Some(Arc::new(geocoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderEndpoint;

    #[tokio::test]
    async fn test_default_config_runs_synthetic_without_geocoder() {
        let state = create_app_state(&AppConfig::default()).unwrap();

        assert_eq!(state.providers.listings, ListingsMode::Synthetic);
        assert!(!state.providers.geocoding_enabled);
    }

    #[tokio::test]
    async fn test_keys_enable_live_providers() {
        let mut config = AppConfig::default();
        config.providers.rentcast = ProviderEndpoint {
            api_key: Some("rc-key".to_string()),
            url: None,
        };
        config.providers.opencage = ProviderEndpoint {
            api_key: Some("oc-key".to_string()),
            url: Some("http://localhost:9/geocode".to_string()),
        };

        let state = create_app_state(&config).unwrap();

        assert_eq!(state.providers.listings, ListingsMode::LiveWithFallback);
        assert!(state.providers.geocoding_enabled);
    }

    #[tokio::test]
    async fn test_live_only_without_fallback() {
        let mut config = AppConfig::default();
        config.comps.mock_fallback = false;
        config.providers.rentcast.api_key = Some("rc-key".to_string());

        let state = create_app_state(&config).unwrap();

        assert_eq!(state.providers.listings, ListingsMode::Live);
    }

    #[tokio::test]
    async fn test_missing_key_without_fallback_is_rejected() {
        let mut config = AppConfig::default();
        config.comps.mock_fallback = false;

        assert!(create_app_state(&config).is_err());
    }

    #[tokio::test]
    async fn test_synthetic_state_serves_coordinate_lookup() {
        let state = create_app_state(&AppConfig::default()).unwrap();

        let response = state
            .comps_service
            .find_comps(infrastructure::services::CompsLookup {
                latitude: Some(26.1224),
                longitude: Some(-80.1373),
                bedrooms: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.meta.source, domain::ListingSource::Mock);
        assert!(response.comps.len() <= 5);
        assert!(response.comps.iter().all(|c| c.bedrooms == 2));
    }
}
