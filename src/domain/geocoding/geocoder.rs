use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use crate::domain::geo::GeoPoint;
use crate::domain::DomainError;

/// A geocoder match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    pub point: GeoPoint,
    pub formatted_address: Option<String>,
}

/// The subject location used by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub point: GeoPoint,
    pub resolved_address: String,
}

/// Trait for free-text address geocoders
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve an address. `Ok(None)` means the provider found no match.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
