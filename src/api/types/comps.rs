//! Comps request body

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::infrastructure::services::CompsLookup;

/// Body of `POST /api/v1/comps`
///
/// Structural checks live here and surface as `422_VALIDATION_ERROR`.
/// Semantic checks (location presence, half-bath steps, recency tokens,
/// coordinate ranges) run in the service and surface as `400_INVALID_INPUT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompsRequest {
    #[validate(length(min = 1, message = "address cannot be empty"))]
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bedrooms: Option<u32>,
    #[validate(range(min = 0.0, message = "bathrooms must be non-negative"))]
    pub bathrooms: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "radius_miles must be greater than 0"))]
    pub radius_miles: Option<f64>,
    #[validate(length(min = 1, message = "days_old cannot be empty"))]
    pub days_old: Option<String>,
}

impl From<CompsRequest> for CompsLookup {
    fn from(request: CompsRequest) -> Self {
        Self {
            address: request.address,
            latitude: request.latitude,
            longitude: request.longitude,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            radius_miles: request.radius_miles,
            days_old: request.days_old,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request: CompsRequest = serde_json::from_value(serde_json::json!({
            "address": "123 Main St, Fort Lauderdale, FL 33301",
            "bedrooms": 3,
            "bathrooms": 2,
            "radius_miles": 5,
            "days_old": "*:270"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.bathrooms, Some(2.0));
    }

    #[test]
    fn test_non_positive_radius_fails_validation() {
        let request = CompsRequest {
            latitude: Some(26.0),
            longitude: Some(-80.0),
            radius_miles: Some(0.0),
            ..Default::default()
        };

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("radius_miles"));
    }

    #[test]
    fn test_negative_bathrooms_fails_validation() {
        let request = CompsRequest {
            bathrooms: Some(-1.0),
            ..Default::default()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_address_fails_validation() {
        let request = CompsRequest {
            address: Some(String::new()),
            ..Default::default()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_bedrooms_rejected_by_deserializer() {
        let result = serde_json::from_value::<CompsRequest>(serde_json::json!({"bedrooms": -1}));

        assert!(result.is_err());
    }

    #[test]
    fn test_into_lookup() {
        let lookup: CompsLookup = CompsRequest {
            address: Some("1 A St, B, FL".to_string()),
            bedrooms: Some(2),
            ..Default::default()
        }
        .into();

        assert_eq!(lookup.address.as_deref(), Some("1 A St, B, FL"));
        assert_eq!(lookup.bedrooms, Some(2));
        assert_eq!(lookup.radius_miles, None);
    }
}
