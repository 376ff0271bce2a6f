// ── Wire-to-domain conversion ──
//
// The api crate's DTOs are serde-lenient; this module is where loose
// data becomes strict. A malformed reception record degrades to
// location-unresolved rather than failing the whole series.

use loradeck_api::models::{LocationDto, RxInfoDto, SearchLocationResponse, UplinkDto};

use crate::model::{GeoPoint, ReceptionRecord, Signal, Snapshot, SnapshotSeries};

/// Convert a search-location response into a domain snapshot series,
/// preserving server order.
pub fn snapshot_series(resp: SearchLocationResponse) -> SnapshotSeries {
    SnapshotSeries::new(resp.uplinks.into_iter().map(snapshot).collect())
}

fn snapshot(dto: UplinkDto) -> Snapshot {
    Snapshot {
        time: dto.time,
        receptions: dto.rx_info.into_iter().map(reception).collect(),
    }
}

fn reception(dto: RxInfoDto) -> ReceptionRecord {
    ReceptionRecord {
        gateway_id: dto.gateway_id,
        signal: Signal {
            rssi: dto.signal.rssi,
            snr: dto.signal.snr,
            tx_power: dto.signal.tx_power,
        },
        location: dto.location.map(geo_point),
        // Distance arrives pre-computed; guard against garbage.
        distance_m: if dto.distance.is_finite() {
            dto.distance.max(0.0)
        } else {
            0.0
        },
    }
}

fn geo_point(dto: LocationDto) -> GeoPoint {
    GeoPoint {
        latitude: dto.latitude,
        longitude: dto.longitude,
        altitude: dto.altitude,
    }
}
