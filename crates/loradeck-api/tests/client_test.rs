#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loradeck_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        base_url,
        SecretString::from("test-token".to_owned()),
    );
    (server, client)
}

// ── Device search ───────────────────────────────────────────────────

#[tokio::test]
async fn search_location_parses_snapshots() {
    let (server, client) = setup().await;

    let body = json!({
        "uplinks": [{
            "time": "2024-05-02T10:15:00Z",
            "rx_info": [
                {
                    "gateway_id": "aa11bb22cc33dd44",
                    "signal": { "rssi": -97.0, "snr": 8.5, "tx_power": 14.0 },
                    "location": { "latitude": 52.37, "longitude": 4.89, "altitude": 12.0 },
                    "distance": 150.0
                },
                {
                    "gateway_id": "ee55ff66aa77bb88",
                    "signal": { "rssi": -110.0, "snr": -2.0, "tx_power": 14.0 },
                    "distance": 900.0
                }
            ]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/api/devices/0102030405060708/search-location"))
        .and(query_param("limit", "5"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let resp = client
        .search_location("0102030405060708", 5)
        .await
        .unwrap();

    assert_eq!(resp.uplinks.len(), 1);
    let rx = &resp.uplinks[0].rx_info;
    assert_eq!(rx.len(), 2);
    assert_eq!(rx[0].gateway_id, "aa11bb22cc33dd44");
    assert!(rx[0].location.is_some());
    // Second gateway has no location field — that's normal data.
    assert!(rx[1].location.is_none());
    assert!((rx[1].distance - 900.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn search_location_empty_series() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/0102030405060708/search-location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uplinks": [] })))
        .mount(&server)
        .await;

    let resp = client
        .search_location("0102030405060708", 10)
        .await
        .unwrap();
    assert!(resp.uplinks.is_empty());
}

#[tokio::test]
async fn search_location_unknown_device_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/ffffffffffffffff/search-location"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "object does not exist" })),
        )
        .mount(&server)
        .await;

    let result = client.search_location("ffffffffffffffff", 5).await;
    assert!(
        matches!(result, Err(Error::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn rejected_token_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/internal/regions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid token" })),
        )
        .mount(&server)
        .await;

    let result = client.list_regions().await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "invalid token"),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Gateway remote control ──────────────────────────────────────────

#[tokio::test]
async fn send_remote_message_returns_response_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/gateways/aa11bb22cc33dd44/remote"))
        .and(body_json(json!({
            "message": "gateway/control/ping?gateway_id=0xaa11bb22cc33dd44"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "pong" })))
        .mount(&server)
        .await;

    let resp = client
        .send_remote_message(
            "aa11bb22cc33dd44",
            "gateway/control/ping?gateway_id=0xaa11bb22cc33dd44",
        )
        .await
        .unwrap();
    assert_eq!(resp, "pong");
}

// ── Regions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_regions_parses_items() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/internal/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "regions": [
                { "id": "eu868", "region": "EU868", "description": "Europe 868 MHz" },
                { "id": "us915_0", "region": "US915", "description": "" }
            ]
        })))
        .mount(&server)
        .await;

    let regions = client.list_regions().await.unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].region, "EU868");
    assert_eq!(regions[1].description, "");
}

// ── Multicast groups ────────────────────────────────────────────────

#[tokio::test]
async fn create_multicast_group_returns_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/multicast-groups"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "3f2a77aa-0001" })),
        )
        .mount(&server)
        .await;

    let req = loradeck_api::models::MulticastGroupRequest {
        application_id: "app-1".into(),
        name: "sensors".into(),
        mc_addr: "01020304".into(),
        mc_nwk_s_key: "00112233445566778899aabbccddeeff".into(),
        mc_app_s_key: "ffeeddccbbaa99887766554433221100".into(),
        f_cnt: 0,
        dr: 5,
        frequency: 868_100_000,
        region: "EU868".into(),
        group_type: "CLASS_C".into(),
        class_b_ping_slot_period: None,
        class_c_scheduling_type: "DELAY".into(),
    };
    let id = client.create_multicast_group(&req).await.unwrap();
    assert_eq!(id, "3f2a77aa-0001");
}

#[tokio::test]
async fn update_multicast_group_surfaces_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/multicast-groups/3f2a77aa-0001"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "invalid mc_addr" })),
        )
        .mount(&server)
        .await;

    let req = loradeck_api::models::MulticastGroupRequest {
        application_id: "app-1".into(),
        name: "sensors".into(),
        mc_addr: "zzzz".into(),
        mc_nwk_s_key: "00112233445566778899aabbccddeeff".into(),
        mc_app_s_key: "ffeeddccbbaa99887766554433221100".into(),
        f_cnt: 0,
        dr: 5,
        frequency: 868_100_000,
        region: "EU868".into(),
        group_type: "CLASS_C".into(),
        class_b_ping_slot_period: None,
        class_c_scheduling_type: "DELAY".into(),
    };
    let result = client.update_multicast_group("3f2a77aa-0001", &req).await;
    assert!(
        matches!(result, Err(Error::Api { status: 400, ref message }) if message == "invalid mc_addr"),
        "expected Api error, got: {result:?}"
    );
}
