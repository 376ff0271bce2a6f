// Wire DTOs for the network-server console API.
//
// These mirror the JSON the server sends and stay deliberately loose:
// every field that can be absent carries a serde default, because a
// half-populated reception record is normal data, not an error.
// `loradeck-core` converts these into strict domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Device search / geolocation ─────────────────────────────────────

/// Response of `GET /api/devices/{dev_eui}/search-location`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchLocationResponse {
    #[serde(default)]
    pub uplinks: Vec<UplinkDto>,
}

/// One historical uplink event with its receiving-gateway records.
#[derive(Debug, Clone, Deserialize)]
pub struct UplinkDto {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub rx_info: Vec<RxInfoDto>,
}

/// One gateway's reception of one uplink.
#[derive(Debug, Clone, Deserialize)]
pub struct RxInfoDto {
    pub gateway_id: String,
    #[serde(default)]
    pub signal: SignalDto,
    /// Absent when the gateway has no resolvable location. May also be
    /// present with non-finite coordinates — the caller treats both as
    /// unresolved.
    #[serde(default)]
    pub location: Option<LocationDto>,
    /// Estimated distance in meters, computed upstream.
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalDto {
    #[serde(default)]
    pub rssi: f64,
    #[serde(default)]
    pub snr: f64,
    #[serde(default)]
    pub tx_power: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

// ── Gateway remote control ──────────────────────────────────────────

/// Body of `POST /api/gateways/{gateway_id}/remote`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteMessageRequest {
    /// Pre-rendered `<topic>?<query-params>` command string.
    pub message: String,
}

/// Display-only response text from a remote gateway command.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMessageResponse {
    #[serde(default)]
    pub response: String,
}

// ── Regions ─────────────────────────────────────────────────────────

/// Response of `GET /api/internal/regions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRegionsResponse {
    #[serde(default)]
    pub regions: Vec<RegionListItem>,
}

/// One configured region on the network server.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionListItem {
    pub id: String,
    pub region: String,
    #[serde(default)]
    pub description: String,
}

// ── Multicast groups ────────────────────────────────────────────────

/// Body of `POST /api/multicast-groups` and `PUT /api/multicast-groups/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MulticastGroupRequest {
    pub application_id: String,
    pub name: String,
    pub mc_addr: String,
    pub mc_nwk_s_key: String,
    pub mc_app_s_key: String,
    pub f_cnt: u32,
    pub dr: u8,
    pub frequency: u32,
    pub region: String,
    pub group_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_b_ping_slot_period: Option<u32>,
    pub class_c_scheduling_type: String,
}

/// Response of a multicast-group create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMulticastGroupResponse {
    pub id: String,
}
