//! Filter engine - binary admit/reject of candidate listings

use crate::domain::geo::{distance_miles, round_miles};
use crate::domain::listing::{Comp, CompQuery, RawListing};

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Missing or unusable price, address, rooms or coordinates
    DataQuality,
    Bedrooms,
    Bathrooms,
    OutsideRadius,
    OutsideRecencyWindow,
}

/// Apply every rule to every candidate, keeping provider order.
///
/// Survivors are annotated with their distance from the subject point,
/// rounded to one decimal. The radius rule uses the unrounded distance.
pub fn filter_listings(listings: &[RawListing], query: &CompQuery) -> Vec<Comp> {
    listings
        .iter()
        .filter_map(|listing| match admit(listing, query) {
            Ok(comp) => Some(comp),
            Err(reason) => {
                tracing::trace!(address = %listing.address, ?reason, "Listing rejected");
                None
            }
        })
        .collect()
}

/// Evaluate one listing against the query
pub fn admit(listing: &RawListing, query: &CompQuery) -> Result<Comp, Rejection> {
    let address = listing.address.trim();

    if address.is_empty() {
        return Err(Rejection::DataQuality);
    }

    let price = listing
        .price
        .filter(|p| p.is_finite() && *p > 0.0 && *p <= u32::MAX as f64)
        .ok_or(Rejection::DataQuality)?;
    let bedrooms = listing.bedrooms.ok_or(Rejection::DataQuality)?;
    let bathrooms = listing
        .bathrooms
        .filter(|b| b.is_finite() && *b >= 0.0)
        .ok_or(Rejection::DataQuality)?;
    let point = listing.point().ok_or(Rejection::DataQuality)?;

    if let Some(wanted) = query.bedrooms() {
        if bedrooms != wanted {
            return Err(Rejection::Bedrooms);
        }
    }

    if let Some(wanted) = query.bathrooms() {
        if !wanted.matches(bathrooms) {
            return Err(Rejection::Bathrooms);
        }
    }

    let distance = distance_miles(query.point(), &point);

    if distance > query.radius_miles() {
        return Err(Rejection::OutsideRadius);
    }

    if let Some(days) = listing.days_on_market {
        if !query.days_old().admits(days) {
            return Err(Rejection::OutsideRecencyWindow);
        }
    }

    Ok(Comp {
        address: address.to_string(),
        price: price.round() as u32,
        bedrooms,
        bathrooms,
        square_footage: listing.square_footage,
        distance_miles: round_miles(distance),
        latitude: point.latitude(),
        longitude: point.longitude(),
        city: listing.city.clone(),
        state: listing.state.clone(),
        zip_code: listing.zip_code.clone(),
        county: listing.county.clone(),
        property_type: listing.property_type.clone(),
    })
}
