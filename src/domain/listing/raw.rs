//! Raw listing as reported by a listings provider

use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoPoint;

/// Candidate listing before any filtering
///
/// Every field except the address may be missing or malformed in provider
/// data; the filter stage decides what survives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawListing {
    pub address: String,
    pub price: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub square_footage: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub county: Option<String>,
    pub property_type: Option<String>,
    pub days_on_market: Option<u32>,
}

impl RawListing {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_rooms(mut self, bedrooms: u32, bathrooms: f64) -> Self {
        self.bedrooms = Some(bedrooms);
        self.bathrooms = Some(bathrooms);
        self
    }

    pub fn with_square_footage(mut self, square_footage: u32) -> Self {
        self.square_footage = Some(square_footage);
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_days_on_market(mut self, days: u32) -> Self {
        self.days_on_market = Some(days);
        self
    }

    /// The listing's location, if both coordinates are present and valid
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_both_coordinates() {
        let listing = RawListing::new("1 A St");
        assert!(listing.point().is_none());

        let mut listing = listing.with_coordinates(26.0, -80.0);
        assert!(listing.point().is_some());

        listing.longitude = None;
        assert!(listing.point().is_none());
    }

    #[test]
    fn test_point_rejects_invalid_coordinates() {
        let listing = RawListing::new("1 A St").with_coordinates(123.0, -80.0);
        assert!(listing.point().is_none());
    }
}
