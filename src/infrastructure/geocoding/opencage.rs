use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, GeoPoint, GeocodedAddress, Geocoder};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// OpenCage forward geocoder restricted to US, high-confidence matches
#[derive(Debug)]
pub struct OpenCageGeocoder<C: HttpClientTrait> {
    client: C,
    api_key: String,
    url: String,
}

impl<C: HttpClientTrait> OpenCageGeocoder<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_url(client, api_key, DEFAULT_OPENCAGE_URL)
    }

    pub fn with_url(client: C, api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: url.into(),
        }
    }

    fn build_params(&self, address: &str) -> Vec<(&'static str, String)> {
        vec![
            ("q", address.trim().to_string()),
            ("key", self.api_key.clone()),
            ("countrycode", "us".to_string()),
            ("limit", "1".to_string()),
            ("no_annotations", "1".to_string()),
            ("min_confidence", "9".to_string()),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> Geocoder for OpenCageGeocoder<C> {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, DomainError> {
        tracing::debug!(address, "Geocoding address");

        let json = self
            .client
            .get_json(
                self.provider_name(),
                &self.url,
                vec![("Accept", "application/json")],
                &self.build_params(address),
            )
            .await?;

        let response: OpenCageResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::upstream(
                self.provider_name(),
                Some(200),
                format!("Failed to parse geocoding response: {}", e),
            )
        })?;

        let Some(result) = response.results.into_iter().next() else {
            return Ok(None);
        };

        let (Some(lat), Some(lng)) = (result.geometry.lat, result.geometry.lng) else {
            tracing::warn!(address, "Geocoding result without coordinates");
            return Ok(None);
        };

        let point = GeoPoint::new(lat, lng).map_err(|_| {
            DomainError::upstream(
                self.provider_name(),
                Some(200),
                format!("Geocoder returned invalid coordinates {}, {}", lat, lng),
            )
        })?;

        tracing::info!(point = %point, "Geocoded address");

        Ok(Some(GeocodedAddress {
            point,
            formatted_address: result.formatted,
        }))
    }

    fn provider_name(&self) -> &'static str {
        "opencage"
    }
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    #[serde(default)]
    geometry: OpenCageGeometry,
    formatted: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenCageGeometry {
    lat: Option<f64>,
    lng: Option<f64>,
}
