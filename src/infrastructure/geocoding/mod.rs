//! Geocoding infrastructure - OpenCage client and location resolver

mod opencage;
mod resolver;

pub use opencage::{OpenCageGeocoder, DEFAULT_OPENCAGE_URL};
pub use resolver::{GeocodeCache, LocationResolver};
