//! Geocoding domain - address resolution contracts

mod address;
mod geocoder;

pub use address::{is_valid_us_address, normalize_address};
pub use geocoder::{GeocodedAddress, Geocoder, ResolvedLocation};

#[cfg(test)]
pub use geocoder::MockGeocoder;
