//! Map projection math for the location canvas.
//!
//! The canvas is an equirectangular window: x is longitude, y is
//! latitude. Circle radii arrive in meters and are converted to
//! latitude degrees; longitude distances shrink with cos(latitude).

use loradeck_core::search::{FocusPoint, Overlay};

/// Meters per degree of latitude (spherical approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Smallest half-span of the map window, in degrees. Keeps a single
/// gateway from rendering as a full-screen blob.
const MIN_HALF_SPAN_DEG: f64 = 0.01;

/// Padding factor applied around the outermost overlay.
const SPAN_PADDING: f64 = 1.2;

/// Convert a distance in meters to latitude degrees.
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE_LAT
}

/// Convert a distance in meters to longitude degrees at a latitude.
/// Clamped away from the poles where the conversion degenerates.
pub fn meters_to_lon_degrees(meters: f64, at_latitude: f64) -> f64 {
    let cos_lat = at_latitude.to_radians().cos().max(0.01);
    meters / (METERS_PER_DEGREE_LAT * cos_lat)
}

/// Canvas window in degree coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Compute a window centered on the focus point that contains every
/// overlay circle, with padding. An empty overlay list yields the
/// minimum window around the focus.
pub fn map_bounds(focus: FocusPoint, overlays: &[Overlay]) -> MapBounds {
    let mut half_lat = MIN_HALF_SPAN_DEG;
    let mut half_lon = MIN_HALF_SPAN_DEG;

    for overlay in overlays {
        let radius_lat = meters_to_lat_degrees(overlay.radius_m);
        let radius_lon = meters_to_lon_degrees(overlay.radius_m, overlay.location.latitude);

        let d_lat = (overlay.location.latitude - focus.latitude).abs() + radius_lat;
        let d_lon = (overlay.location.longitude - focus.longitude).abs() + radius_lon;

        half_lat = half_lat.max(d_lat * SPAN_PADDING);
        half_lon = half_lon.max(d_lon * SPAN_PADDING);
    }

    MapBounds {
        x: [focus.longitude - half_lon, focus.longitude + half_lon],
        y: [focus.latitude - half_lat, focus.latitude + half_lat],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loradeck_core::model::GeoPoint;
    use loradeck_core::search::Palette;

    fn overlay(lat: f64, lon: f64, radius_m: f64) -> Overlay {
        Overlay {
            location: GeoPoint {
                latitude: lat,
                longitude: lon,
                altitude: 0.0,
            },
            radius_m,
            color: Palette::default().color_for(0),
            label: "gw".into(),
        }
    }

    #[test]
    fn lat_conversion_is_linear() {
        let one_km = meters_to_lat_degrees(1000.0);
        assert!((one_km - 0.008_983).abs() < 1e-4);
    }

    #[test]
    fn lon_conversion_grows_toward_the_poles() {
        let at_equator = meters_to_lon_degrees(1000.0, 0.0);
        let at_60 = meters_to_lon_degrees(1000.0, 60.0);
        assert!(at_60 > at_equator * 1.9 && at_60 < at_equator * 2.1);
    }

    #[test]
    fn empty_overlays_yield_minimum_window() {
        let focus = FocusPoint {
            latitude: 52.0,
            longitude: 4.9,
        };
        let bounds = map_bounds(focus, &[]);
        assert!((bounds.y[1] - bounds.y[0] - 2.0 * MIN_HALF_SPAN_DEG).abs() < 1e-9);
        assert!((bounds.x[0] + bounds.x[1]) / 2.0 - 4.9 < 1e-9);
    }

    #[test]
    fn window_contains_every_circle() {
        let focus = FocusPoint {
            latitude: 52.0,
            longitude: 4.9,
        };
        let overlays = vec![overlay(52.05, 4.95, 2000.0), overlay(51.98, 4.85, 500.0)];
        let bounds = map_bounds(focus, &overlays);

        for o in &overlays {
            let r_lat = meters_to_lat_degrees(o.radius_m);
            assert!(o.location.latitude + r_lat <= bounds.y[1]);
            assert!(o.location.latitude - r_lat >= bounds.y[0]);
        }
    }
}
