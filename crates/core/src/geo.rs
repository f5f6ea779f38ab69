//! Great-circle distance on a spherical earth.

use std::f64::consts::PI;

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite and inside the usual degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Degrees to radians as `deg * PI / 180`, rounding after each step.
#[inline]
fn radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// Plain multiplies and adds in a fixed order, no fused operations.
#[inline]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlon = radians(b.lon - a.lon);
    let dlat = radians(b.lat - a.lat);
    let lat1 = radians(a.lat);
    let lat2 = radians(b.lat);

    let h = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin() * (dlon / 2.0).sin();
    // h can drift a hair above 1.0 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().asin();
    c * EARTH_RADIUS_KM
}
