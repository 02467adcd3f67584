use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{CompQuery, DomainError, ListingsProvider, RawListing};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_RENTCAST_URL: &str = "https://api.rentcast.io/v1/listings/rental/long-term";

/// RentCast long-term rental listings provider
#[derive(Debug)]
pub struct RentCastProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    url: String,
}

impl<C: HttpClientTrait> RentCastProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_url(client, api_key, DEFAULT_RENTCAST_URL)
    }

    pub fn with_url(client: C, api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_params(&self, query: &CompQuery, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("latitude", query.point().latitude().to_string()),
            ("longitude", query.point().longitude().to_string()),
            ("radius", query.radius_miles().to_string()),
            ("daysOld", query.days_old().as_str().to_string()),
            ("limit", limit.to_string()),
        ];

        if let Some(bedrooms) = query.bedrooms() {
            params.push(("bedrooms", bedrooms.to_string()));
        }

        if let Some(bathrooms) = query.bathrooms() {
            params.push(("bathrooms", bathrooms.to_string()));
        }

        params
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("X-Api-Key", self.api_key.as_str()),
            ("Accept", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> ListingsProvider for RentCastProvider<C> {
    async fn fetch_listings(
        &self,
        query: &CompQuery,
        limit: u32,
    ) -> Result<Vec<RawListing>, DomainError> {
        let params = self.build_params(query, limit);

        tracing::debug!(
            point = %query.point(),
            radius = query.radius_miles(),
            bedrooms = ?query.bedrooms(),
            bathrooms = ?query.bathrooms().map(|b| b.value()),
            limit,
            "Fetching RentCast listings"
        );

        let json = self
            .client
            .get_json(self.provider_name(), &self.url, self.headers(), &params)
            .await?;

        parse_listings(json)
    }

    fn provider_name(&self) -> &'static str {
        "rentcast"
    }
}

/// Parse a RentCast response body.
///
/// The body must be an array; entries that cannot be read are skipped so a
/// single malformed listing does not fail the whole batch.
fn parse_listings(json: serde_json::Value) -> Result<Vec<RawListing>, DomainError> {
    let serde_json::Value::Array(entries) = json else {
        return Err(DomainError::provider_unavailable(
            "Listings provider returned an unexpected response shape",
        ));
    };

    let total = entries.len();
    let listings: Vec<RawListing> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RentCastListing>(entry) {
            Ok(listing) => listing.into_raw(),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable RentCast listing");
                None
            }
        })
        .collect();

    if listings.len() < total {
        tracing::debug!(
            total,
            kept = listings.len(),
            "Dropped RentCast entries without an address or with unreadable fields"
        );
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RentCastListing {
    formatted_address: Option<String>,
    address_line1: Option<String>,
    address: Option<String>,
    price: Option<f64>,
    bedrooms: Option<f64>,
    bathrooms: Option<f64>,
    square_footage: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    county: Option<String>,
    property_type: Option<String>,
    days_on_market: Option<f64>,
}

impl RentCastListing {
    fn into_raw(self) -> Option<RawListing> {
        let address = self
            .formatted_address
            .or(self.address_line1)
            .or(self.address)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())?;

        Some(RawListing {
            address,
            price: self.price,
            bedrooms: self.bedrooms.and_then(whole_count),
            bathrooms: self.bathrooms,
            square_footage: self.square_footage.and_then(whole_count),
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            county: self.county,
            property_type: self.property_type,
            days_on_market: self.days_on_market.and_then(whole_count),
        })
    }
}

/// Providers sometimes send integral counts as floats (`3.0`)
fn whole_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bathrooms, GeoPoint, RecencyToken};
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;

    const URL: &str = "https://rentcast.test/listings";

    fn query() -> CompQuery {
        CompQuery::new(
            GeoPoint::new(26.1224, -80.1373).unwrap(),
            Some(3),
            Some(Bathrooms::new(2.0).unwrap()),
            5.0,
            RecencyToken::parse("*:270").unwrap(),
        )
        .unwrap()
    }

    fn sample_body() -> serde_json::Value {
        json!([
            {
                "formattedAddress": "456 Oak Ave, Fort Lauderdale, FL 33301",
                "price": 2400,
                "bedrooms": 3,
                "bathrooms": 2.0,
                "squareFootage": 1400,
                "latitude": 26.1300,
                "longitude": -80.1400,
                "city": "Fort Lauderdale",
                "state": "FL",
                "zipCode": "33301",
                "county": "Broward",
                "propertyType": "Single Family",
                "daysOnMarket": 12
            },
            {
                "addressLine1": "789 Pine Rd",
                "price": 2300.0,
                "bedrooms": 3.0,
                "bathrooms": 2,
                "latitude": 26.1400,
                "longitude": -80.1300
            }
        ])
    }

    #[tokio::test]
    async fn test_fetch_listings_parses_body() {
        let client = MockHttpClient::new().with_response(URL, sample_body());
        let provider = RentCastProvider::with_url(client, "key", URL);

        let listings = provider.fetch_listings(&query(), 50).await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].address, "456 Oak Ave, Fort Lauderdale, FL 33301");
        assert_eq!(listings[0].price, Some(2400.0));
        assert_eq!(listings[0].square_footage, Some(1400));
        assert_eq!(listings[0].zip_code.as_deref(), Some("33301"));
        assert_eq!(listings[0].county.as_deref(), Some("Broward"));
        assert_eq!(listings[0].property_type.as_deref(), Some("Single Family"));
        assert_eq!(listings[0].days_on_market, Some(12));
        assert_eq!(listings[1].address, "789 Pine Rd");
        assert_eq!(listings[1].bedrooms, Some(3));
        assert_eq!(listings[1].square_footage, None);
    }

    #[tokio::test]
    async fn test_fetch_listings_sends_filters() {
        let client = MockHttpClient::new().with_response(URL, json!([]));
        let provider = RentCastProvider::with_url(client, "key", URL);

        provider.fetch_listings(&query(), 50).await.unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);

        let params = &requests[0].1;
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("latitude"), Some("26.1224"));
        assert_eq!(get("longitude"), Some("-80.1373"));
        assert_eq!(get("radius"), Some("5"));
        assert_eq!(get("daysOld"), Some("*:270"));
        assert_eq!(get("limit"), Some("50"));
        assert_eq!(get("bedrooms"), Some("3"));
        assert_eq!(get("bathrooms"), Some("2"));
    }

    #[tokio::test]
    async fn test_optional_filters_omitted() {
        let client = MockHttpClient::new().with_response(URL, json!([]));
        let provider = RentCastProvider::with_url(client, "key", URL);
        let query = CompQuery::new(
            GeoPoint::new(26.1224, -80.1373).unwrap(),
            None,
            None,
            2.5,
            RecencyToken::parse("30").unwrap(),
        )
        .unwrap();

        provider.fetch_listings(&query, 50).await.unwrap();

        let params = &provider.client.requests()[0].1;
        assert!(params.iter().all(|(k, _)| k != "bedrooms" && k != "bathrooms"));
    }

    #[tokio::test]
    async fn test_entries_without_address_are_skipped() {
        let body = json!([
            {"price": 2000, "latitude": 26.1, "longitude": -80.1},
            {"formattedAddress": "  ", "price": 2000},
            {"formattedAddress": "1 Bad St", "price": "not a number"},
            {"formattedAddress": "2 Good St", "price": 2100}
        ]);
        let client = MockHttpClient::new().with_response(URL, body);
        let provider = RentCastProvider::with_url(client, "key", URL);

        let listings = provider.fetch_listings(&query(), 50).await.unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].address, "2 Good St");
    }

    #[tokio::test]
    async fn test_non_array_body_is_provider_unavailable() {
        let client = MockHttpClient::new().with_response(URL, json!({"error": "nope"}));
        let provider = RentCastProvider::with_url(client, "key", URL);

        let err = provider.fetch_listings(&query(), 50).await.unwrap_err();

        assert!(matches!(err, DomainError::ProviderUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_status_errors_carry_provider_name() {
        let client = MockHttpClient::new().with_status(URL, 429);
        let provider = RentCastProvider::with_url(client, "key", URL);

        let err = provider.fetch_listings(&query(), 50).await.unwrap_err();

        assert!(err.is_retryable());
        match err {
            DomainError::Upstream { provider, .. } => assert_eq!(provider, "rentcast"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_unreachable() {
        let client = MockHttpClient::new().with_transport_error(URL);
        let provider = RentCastProvider::with_url(client, "key", URL);

        let err = provider.fetch_listings(&query(), 50).await.unwrap_err();

        assert!(err.is_unreachable());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_whole_count() {
        assert_eq!(whole_count(3.0), Some(3));
        assert_eq!(whole_count(2.5), None);
        assert_eq!(whole_count(-1.0), None);
        assert_eq!(whole_count(f64::NAN), None);
    }
}
