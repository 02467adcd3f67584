//! Location resolver - turns request location fields into a subject point

use std::sync::Arc;
use std::time::Instant;

use crate::domain::geocoding::{is_valid_us_address, normalize_address};
use crate::domain::{DomainError, GeoPoint, GeocodedAddress, Geocoder, ResolvedLocation};
use crate::infrastructure::cache::{CacheStats, TtlCache};
use crate::infrastructure::observability::{record_cache_lookup, record_provider_request};

const CACHE_NAME: &str = "geocode";

pub type GeocodeCache = TtlCache<String, GeocodedAddress>;

/// Resolves explicit coordinates or a free-text address to a location
///
/// Explicit latitude and longitude always win; the geocoder is only consulted
/// when one of them is missing.
#[derive(Debug)]
pub struct LocationResolver {
    geocoder: Option<Arc<dyn Geocoder>>,
    cache: Arc<GeocodeCache>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, cache: Arc<GeocodeCache>) -> Self {
        Self {
            geocoder: Some(geocoder),
            cache,
        }
    }

    /// A resolver that only accepts explicit coordinates
    pub fn without_geocoder(cache: Arc<GeocodeCache>) -> Self {
        Self {
            geocoder: None,
            cache,
        }
    }

    pub fn has_geocoder(&self) -> bool {
        self.geocoder.is_some()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn resolve(
        &self,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<ResolvedLocation, DomainError> {
        let address = address.map(str::trim).filter(|a| !a.is_empty());

        if let (Some(lat), Some(lng)) = (latitude, longitude) {
            let point = GeoPoint::new(lat, lng)?;
            let resolved_address = address
                .map(str::to_string)
                .unwrap_or_else(|| format!("Location at {}, {}", lat, lng));

            return Ok(ResolvedLocation {
                point,
                resolved_address,
            });
        }

        let Some(address) = address else {
            return Err(DomainError::invalid_input(
                "Must provide either address or latitude & longitude",
            ));
        };

        if !is_valid_us_address(address) {
            return Err(DomainError::invalid_input("Invalid US address format"));
        }

        let geocoded = self.geocode(address).await?;

        Ok(ResolvedLocation {
            point: geocoded.point,
            resolved_address: geocoded
                .formatted_address
                .unwrap_or_else(|| address.to_string()),
        })
    }

    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, DomainError> {
        let key = normalize_address(address);

        if let Some(hit) = self.cache.get(&key).await {
            record_cache_lookup(CACHE_NAME, true);
            tracing::debug!(address = %key, "Geocode cache hit");
            return Ok(hit);
        }

        record_cache_lookup(CACHE_NAME, false);

        let Some(geocoder) = &self.geocoder else {
            return Err(DomainError::provider_unavailable(
                "Geocoding is not configured; supply latitude and longitude",
            ));
        };

        let started = Instant::now();
        let result = geocoder.geocode(address).await;
        record_provider_request(geocoder.provider_name(), result.is_ok(), started.elapsed());

        match result {
            Ok(Some(geocoded)) => {
                self.cache.insert(key, geocoded.clone()).await;
                Ok(geocoded)
            }
            Ok(None) => Err(DomainError::invalid_input("Address not found or invalid")),
            Err(DomainError::Upstream {
                provider,
                status,
                message,
            }) => {
                tracing::error!(%provider, ?status, %message, "Geocoding failed");
                Err(DomainError::provider_unavailable(
                    "Geocoding service is unavailable",
                ))
            }
            Err(other) => Err(other),
        }
    }
}
