use std::f64::consts::PI;

use super::point::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Antipodal distance, the largest value [`distance_km`] can return.
pub const MAX_DISTANCE_KM: f64 = PI * EARTH_RADIUS_KM;

/// Great-circle distance between two points (haversine), in kilometers.
///
/// `sqrt(h)` is clamped to 1 so rounding on near-antipodal pairs never
/// pushes `asin` out of its domain.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
