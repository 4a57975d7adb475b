use serde::{Deserialize, Serialize};

use super::distance::EARTH_RADIUS_KM;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn latitude_in_range(latitude: f64) -> bool {
        (-90.0..=90.0).contains(&latitude)
    }

    #[must_use]
    pub fn longitude_in_range(longitude: f64) -> bool {
        (-180.0..=180.0).contains(&longitude)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::latitude_in_range(self.latitude) && Self::longitude_in_range(self.longitude)
    }
}

/// Map viewport. `south <= north` and `west <= east`; boxes crossing the
/// antimeridian are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Inclusive on all four edges.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }

    /// Smallest lat/lng box that contains every point within `radius_km` of
    /// `center` (great-circle distance).
    ///
    /// Latitude spans `radius / R` radians either side. The longitude
    /// half-width at the center latitude is `asin(sin(radius / R) / cos(lat))`;
    /// when a pole falls inside the circle, or the box would cross the
    /// antimeridian, the full longitude range is used instead.
    #[must_use]
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        // Absorbs rounding in the trigonometry so edge points stay inside.
        const PAD_DEG: f64 = 1e-9;

        let angular = radius_km / EARTH_RADIUS_KM;
        let lat = center.latitude.to_radians();
        let lat_delta = angular.to_degrees() + PAD_DEG;

        let mut north = center.latitude + lat_delta;
        let mut south = center.latitude - lat_delta;
        let mut west = -180.0;
        let mut east = 180.0;

        let pole_inside = north >= 90.0 || south <= -90.0;
        north = north.min(90.0);
        south = south.max(-90.0);

        let ratio = angular.sin() / lat.cos();
        if !pole_inside && ratio < 1.0 {
            let lng_delta = ratio.asin().to_degrees() + PAD_DEG;
            let candidate_west = center.longitude - lng_delta;
            let candidate_east = center.longitude + lng_delta;
            if candidate_west >= -180.0 && candidate_east <= 180.0 {
                west = candidate_west;
                east = candidate_east;
            }
        }

        Self {
            north,
            south,
            east,
            west,
        }
    }
}
