// ── Geolocation rendering model ──
//
// Pure projection of a snapshot's reception records into map overlays
// and per-gateway cards. Contains no drawing code; the terminal layer
// consumes `RenderOutput` however it likes.

use crate::model::{GeoPoint, ReceptionRecord, Signal, SnapshotSeries};
use crate::search::palette::{Palette, PaletteEntry};

/// One map circle for a gateway with a resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub location: GeoPoint,
    pub radius_m: f64,
    pub color: PaletteEntry,
    pub label: String,
}

/// One per-gateway detail card. Present for every reception record,
/// located or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCard {
    pub gateway_id: String,
    pub signal: Signal,
    pub distance_m: f64,
    pub color: PaletteEntry,
    pub location: Option<GeoPoint>,
}

impl GatewayCard {
    /// False renders as a "no location detected" card.
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}

/// Everything derived from one snapshot's receptions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    pub overlays: Vec<Overlay>,
    pub cards: Vec<GatewayCard>,
}

impl RenderOutput {
    /// An empty output hides the map entirely.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Project reception records into overlays and cards.
///
/// Colors are assigned by record position, wrapping over the palette,
/// so a gateway keeps its color only within one snapshot. Records
/// without a resolved location still get a card (and a color) but no
/// overlay.
pub fn render(receptions: &[ReceptionRecord], palette: &Palette) -> RenderOutput {
    let mut out = RenderOutput {
        overlays: Vec::new(),
        cards: Vec::with_capacity(receptions.len()),
    };
    for (idx, rec) in receptions.iter().enumerate() {
        let color = palette.color_for(idx);
        let location = rec.resolved_location();
        if let Some(loc) = location {
            out.overlays.push(Overlay {
                location: loc,
                radius_m: rec.distance_m,
                color,
                label: rec.gateway_id.clone(),
            });
        }
        out.cards.push(GatewayCard {
            gateway_id: rec.gateway_id.clone(),
            signal: rec.signal,
            distance_m: rec.distance_m,
            color,
            location,
        });
    }
    out
}

/// The map center. Starts from the series (or a configured default)
/// and moves when the user re-centers on a gateway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl FocusPoint {
    /// Initial focus for a freshly loaded series: the first reception
    /// of the first snapshot when it has a resolved location, else the
    /// configured default center.
    pub fn initial(series: &SnapshotSeries, default_center: (f64, f64)) -> Self {
        series
            .first()
            .and_then(|snap| snap.receptions.first())
            .and_then(ReceptionRecord::resolved_location)
            .map_or(
                Self {
                    latitude: default_center.0,
                    longitude: default_center.1,
                },
                Self::from_point,
            )
    }

    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }

    /// Re-center on a gateway ("find" on its card).
    pub fn recenter(&mut self, point: GeoPoint) {
        self.latitude = point.latitude;
        self.longitude = point.longitude;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Snapshot;
    use chrono::Utc;

    fn located(gw: &str, lat: f64, lon: f64, dist: f64) -> ReceptionRecord {
        ReceptionRecord {
            gateway_id: gw.into(),
            signal: Signal {
                rssi: -90.0,
                snr: 7.5,
                tx_power: 14.0,
            },
            location: Some(GeoPoint {
                latitude: lat,
                longitude: lon,
                altitude: 0.0,
            }),
            distance_m: dist,
        }
    }

    fn unlocated(gw: &str) -> ReceptionRecord {
        ReceptionRecord {
            gateway_id: gw.into(),
            signal: Signal::default(),
            location: None,
            distance_m: 120.0,
        }
    }

    #[test]
    fn every_record_gets_a_card_only_located_get_overlays() {
        let records = vec![
            located("gw-a", 52.0, 4.9, 300.0),
            unlocated("gw-b"),
            located("gw-c", 52.1, 5.0, 80.0),
        ];
        let out = render(&records, &Palette::default());

        assert_eq!(out.cards.len(), 3);
        assert_eq!(out.overlays.len(), 2);
        assert_eq!(out.overlays[0].label, "gw-a");
        assert_eq!(out.overlays[1].label, "gw-c");
        assert!(!out.cards[1].has_location());
        assert!(out.cards[2].has_location());
    }

    #[test]
    fn colors_assigned_by_position_with_wrap_around() {
        let palette = Palette::default();
        let records: Vec<_> = (0..7).map(|i| unlocated(&format!("gw-{i}"))).collect();
        let out = render(&records, &palette);

        for (idx, card) in out.cards.iter().enumerate() {
            assert_eq!(card.color, palette.color_for(idx));
        }
        // Sixth record wraps back to the first palette entry.
        assert_eq!(out.cards[5].color, out.cards[0].color);
    }

    #[test]
    fn unlocated_records_keep_their_palette_slot() {
        let palette = Palette::default();
        let records = vec![unlocated("gw-a"), located("gw-b", 1.0, 2.0, 50.0)];
        let out = render(&records, &palette);

        // Overlay for gw-b carries slot 1's color, not slot 0's.
        assert_eq!(out.overlays[0].color, palette.color_for(1));
    }

    #[test]
    fn zero_coordinates_are_rendered() {
        let records = vec![located("null-island", 0.0, 0.0, 10.0)];
        let out = render(&records, &Palette::default());
        assert_eq!(out.overlays.len(), 1);
        assert!(out.cards[0].has_location());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = render(&[], &Palette::default());
        assert!(out.is_empty());
        assert!(out.overlays.is_empty());
    }

    #[test]
    fn initial_focus_uses_first_reception_then_falls_back() {
        let series = SnapshotSeries::new(vec![Snapshot {
            time: Utc::now(),
            receptions: vec![located("gw-a", 51.9, 4.5, 100.0)],
        }]);
        let focus = FocusPoint::initial(&series, (40.0, -3.7));
        assert!((focus.latitude - 51.9).abs() < f64::EPSILON);

        let bare = SnapshotSeries::new(vec![Snapshot {
            time: Utc::now(),
            receptions: vec![unlocated("gw-a")],
        }]);
        let focus = FocusPoint::initial(&bare, (40.0, -3.7));
        assert!((focus.latitude - 40.0).abs() < f64::EPSILON);
        assert!((focus.longitude + 3.7).abs() < f64::EPSILON);
    }

    #[test]
    fn recenter_moves_the_focus() {
        let mut focus = FocusPoint {
            latitude: 0.0,
            longitude: 0.0,
        };
        focus.recenter(GeoPoint {
            latitude: 48.8,
            longitude: 2.3,
            altitude: 35.0,
        });
        assert!((focus.latitude - 48.8).abs() < f64::EPSILON);
        assert!((focus.longitude - 2.3).abs() < f64::EPSILON);
    }
}
