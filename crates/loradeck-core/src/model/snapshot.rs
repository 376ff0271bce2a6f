// ── Uplink snapshot domain types ──
//
// A snapshot is one historical uplink event; each receiving gateway
// contributes a reception record. A series is the result of one search
// query and is replaced wholesale by the next — never mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// Signal quality of one reception.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Received signal strength in dBm.
    pub rssi: f64,
    /// Signal-to-noise ratio in dB.
    pub snr: f64,
    /// Transmit power.
    pub tx_power: f64,
}

/// One gateway's observation of one uplink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionRecord {
    pub gateway_id: String,
    pub signal: Signal,
    /// Geographic fix, if the gateway's location is known. `distance_m`
    /// and `location` are independent: a record may carry a distance
    /// estimate with no fix.
    pub location: Option<GeoPoint>,
    /// Estimated distance from the device in meters, computed upstream.
    pub distance_m: f64,
}

impl ReceptionRecord {
    /// The record's location, if present *and* usable. A present but
    /// non-finite fix counts as unresolved, not as an error.
    pub fn resolved_location(&self) -> Option<GeoPoint> {
        self.location.filter(GeoPoint::is_resolved)
    }
}

/// One historical uplink event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: DateTime<Utc>,
    /// Order is significant only for color assignment (index-based),
    /// not for domain meaning.
    pub receptions: Vec<ReceptionRecord>,
}

/// The ordered result of one search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSeries(Vec<Snapshot>);

impl SnapshotSeries {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self(snapshots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SnapshotSeries {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
