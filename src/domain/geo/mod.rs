//! Geographic primitives - points and great-circle distance

mod distance;
mod point;

pub use distance::{destination, distance_miles, round_miles, EARTH_RADIUS_MILES};
pub use point::GeoPoint;
