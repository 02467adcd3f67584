//! Comp - a comparable rental listing annotated with its distance

use serde::{Deserialize, Serialize};

/// Output entity, immutable once constructed by the filter stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comp {
    pub address: String,
    pub price: u32,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_footage: Option<u32>,
    /// Distance from the subject property, one decimal
    pub distance_miles: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}
