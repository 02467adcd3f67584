//! Haversine great-circle distance

use super::GeoPoint;

/// Mean Earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points in miles (unrounded)
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlng = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Round a mileage to one decimal place, halves away from zero
pub fn round_miles(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Point reached by travelling `miles` from `origin` along an initial `bearing_deg`
pub fn destination(origin: &GeoPoint, bearing_deg: f64, miles: f64) -> GeoPoint {
    let angular = miles / EARTH_RADIUS_MILES;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.latitude().to_radians();
    let lng1 = origin.longitude().to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    // Normalise longitude into [-180, 180]
    let lng2 = (lng2.to_degrees() + 540.0) % 360.0 - 180.0;
    let lat2 = lat2.to_degrees().clamp(-90.0, 90.0);

    GeoPoint::new(lat2, lng2).unwrap_or(*origin)
}
