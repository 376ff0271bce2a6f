// ── Geographic types ──

use serde::{Deserialize, Serialize};

/// A geographic fix.
///
/// A point with non-finite latitude or longitude is "unresolved" — the
/// upstream geolocation service could not place the gateway. Zero is a
/// valid coordinate (the Gulf of Guinea exists) and is never treated as
/// a missing-location sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Whether this point carries usable coordinates.
    pub fn is_resolved(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coordinates_are_resolved() {
        assert!(GeoPoint::new(0.0, 0.0, 0.0).is_resolved());
    }

    #[test]
    fn non_finite_coordinates_are_unresolved() {
        assert!(!GeoPoint::new(f64::NAN, 4.89, 0.0).is_resolved());
        assert!(!GeoPoint::new(52.37, f64::INFINITY, 0.0).is_resolved());
    }
}
