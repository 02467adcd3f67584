//! Comps service - resolve, fetch and run the pipeline under one deadline

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[cfg(test)]
use mockall::automock;

use crate::domain::{
    build_response, Bathrooms, CompQuery, CompsResponse, DomainError, RecencyToken,
};
use crate::infrastructure::cache::CacheStats;
use crate::infrastructure::geocoding::LocationResolver;
use crate::infrastructure::listings::ListingsGateway;
use crate::infrastructure::observability::record_comps_result;

/// Request-independent defaults and limits
#[derive(Debug, Clone)]
pub struct CompsServiceConfig {
    pub default_radius_miles: f64,
    pub default_days_old: RecencyToken,
    pub max_results: usize,
    pub request_timeout: Duration,
    /// Report an empty result as `NoResults` instead of an empty list
    pub strict_no_results: bool,
}

impl Default for CompsServiceConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: 5.0,
            default_days_old: RecencyToken::default(),
            max_results: 5,
            request_timeout: Duration::from_secs(12),
            strict_no_results: false,
        }
    }
}

/// A comps lookup as received from a caller, before resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompsLookup {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub radius_miles: Option<f64>,
    pub days_old: Option<String>,
}

/// Counters for both shared caches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompsCacheStats {
    pub geocode: CacheStats,
    pub listings: CacheStats,
}

/// Trait for the comps service (for dynamic dispatch in AppState)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompsServiceTrait: Send + Sync + Debug {
    async fn find_comps(&self, lookup: CompsLookup) -> Result<CompsResponse, DomainError>;

    async fn cache_stats(&self) -> CompsCacheStats;

    /// Drop every cached geocode and listings batch
    async fn clear_caches(&self);
}

#[derive(Debug)]
pub struct CompsService {
    resolver: Arc<LocationResolver>,
    gateway: Arc<ListingsGateway>,
    config: CompsServiceConfig,
}

impl CompsService {
    pub fn new(
        resolver: Arc<LocationResolver>,
        gateway: Arc<ListingsGateway>,
        config: CompsServiceConfig,
    ) -> Self {
        Self {
            resolver,
            gateway,
            config,
        }
    }

    async fn run(&self, lookup: CompsLookup) -> Result<CompsResponse, DomainError> {
        // Reject malformed filters before spending a geocoder call
        let bathrooms = lookup.bathrooms.map(Bathrooms::new).transpose()?;
        let days_old = match lookup.days_old.as_deref() {
            Some(token) => RecencyToken::parse(token)?,
            None => self.config.default_days_old.clone(),
        };
        let radius_miles = lookup.radius_miles.unwrap_or(self.config.default_radius_miles);

        let location = self
            .resolver
            .resolve(lookup.address.as_deref(), lookup.latitude, lookup.longitude)
            .await?;

        let query = CompQuery::new(
            location.point,
            lookup.bedrooms,
            bathrooms,
            radius_miles,
            days_old,
        )?;

        let batch = self.gateway.fetch(&query).await?;
        let response = build_response(&batch, &query, &location, self.config.max_results);

        record_comps_result(
            &response.meta.source.to_string(),
            response.meta.total_candidates,
            response.comps.len(),
        );

        if response.comps.is_empty() && self.config.strict_no_results {
            return Err(DomainError::no_results(
                "No rental comps matched the requested criteria",
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl CompsServiceTrait for CompsService {
    #[instrument(skip(self, lookup), fields(has_address = lookup.address.is_some()))]
    async fn find_comps(&self, lookup: CompsLookup) -> Result<CompsResponse, DomainError> {
        let started = Instant::now();

        let response = tokio::time::timeout(self.config.request_timeout, self.run(lookup))
            .await
            .map_err(|_| {
                warn!(
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "Comps request timed out"
                );
                DomainError::provider_unavailable("Request timed out waiting for providers")
            })??;

        info!(
            comps = response.comps.len(),
            matches = response.meta.total_matches,
            source = %response.meta.source,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Comps request complete"
        );

        Ok(response)
    }

    async fn cache_stats(&self) -> CompsCacheStats {
        CompsCacheStats {
            geocode: self.resolver.cache_stats().await,
            listings: self.gateway.cache_stats().await,
        }
    }

    async fn clear_caches(&self) {
        self.resolver.clear_cache().await;
        self.gateway.clear_cache().await;
    }
}
