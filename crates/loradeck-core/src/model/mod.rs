//! Canonical domain types for the console.

mod eui;
mod geo;
pub mod multicast;
mod snapshot;

pub use eui::Eui64;
pub use geo::GeoPoint;
pub use multicast::{
    AesKey, ClassCSchedulingType, DevAddr, FieldError, MulticastGroup, MulticastGroupDraft,
    MulticastGroupType, Region,
};
pub use snapshot::{ReceptionRecord, Signal, Snapshot, SnapshotSeries};
