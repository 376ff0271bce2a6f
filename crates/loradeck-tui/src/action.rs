//! All possible UI actions. Actions are the sole mechanism for state mutation.

use loradeck_api::models::RegionListItem;
use loradeck_core::CoreError;
use loradeck_core::model::{Eui64, MulticastGroup, SnapshotSeries};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Device location search ────────────────────────────────────
    /// Dispatch one validated search query. `seq` ties the eventual
    /// completion back to the query that produced it.
    RequestSearch {
        dev_eui: Eui64,
        seq: u64,
        limit: u32,
    },
    SearchCompleted {
        seq: u64,
        outcome: Result<SnapshotSeries, CoreError>,
    },

    // ── Gateway remote control ────────────────────────────────────
    RequestRemote {
        gateway_id: Eui64,
        message: String,
    },
    RemoteCompleted(Result<String, CoreError>),

    // ── Multicast groups ──────────────────────────────────────────
    RequestRegions,
    RegionsLoaded(Result<Vec<RegionListItem>, CoreError>),
    RequestSaveMulticast(MulticastGroup),
    MulticastSaved(Result<String, CoreError>),
}
