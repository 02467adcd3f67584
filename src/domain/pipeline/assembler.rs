//! Result assembler - caps the ranked list and builds the response envelope

use serde::{Deserialize, Serialize};

use crate::domain::geocoding::ResolvedLocation;
use crate::domain::listing::{Comp, CompQuery, ListingSource};

/// Echo of the resolved request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    pub resolved_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub radius_miles: f64,
    pub days_old: String,
}

impl InputSummary {
    pub fn new(location: &ResolvedLocation, query: &CompQuery) -> Self {
        Self {
            resolved_address: location.resolved_address.clone(),
            latitude: location.point.latitude(),
            longitude: location.point.longitude(),
            bedrooms: query.bedrooms(),
            bathrooms: query.bathrooms().map(|b| b.value()),
            radius_miles: query.radius_miles(),
            days_old: query.days_old().to_string(),
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Where the candidate listings came from; `mock` flags degraded mode
    pub source: ListingSource,
    /// Raw candidates considered
    pub total_candidates: usize,
    /// Comps that survived filtering and dedup, before the cap
    pub total_matches: usize,
}

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsResponse {
    pub input: InputSummary,
    pub comps: Vec<Comp>,
    pub meta: ResponseMeta,
}

/// Truncate the ranked list to `cap` and wrap it. An empty list is a valid result.
pub fn assemble_response(
    ranked: Vec<Comp>,
    input: InputSummary,
    source: ListingSource,
    total_candidates: usize,
    cap: usize,
) -> CompsResponse {
    let total_matches = ranked.len();
    let mut comps = ranked;
    comps.truncate(cap);

    CompsResponse {
        input,
        comps,
        meta: ResponseMeta {
            source,
            total_candidates,
            total_matches,
        },
    }
}
