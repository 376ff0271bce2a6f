//! Async HTTP client for the LoRaWAN network-server console API.
//!
//! One [`ApiClient`] covers the console's whole surface:
//!
//! - **Device search** — historical uplink snapshots with per-gateway
//!   reception records ([`ApiClient::search_location`]).
//! - **Gateway remote control** — fire-and-forget command strings with
//!   display-only response text ([`ApiClient::send_remote_message`]).
//! - **Regions** — server region configurations
//!   ([`ApiClient::list_regions`]).
//! - **Multicast groups** — create/update
//!   ([`ApiClient::create_multicast_group`],
//!   [`ApiClient::update_multicast_group`]).
//!
//! Wire DTOs live in [`models`] and stay serde-lenient; strict domain
//! types and conversion live in `loradeck-core`.

mod client;
mod devices;
mod gateways;
mod internal;
mod multicast;

pub mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
