//! Device-location search: snapshot selection, palette assignment and
//! the map/card projection.

mod controller;
mod index;
mod palette;
mod render;

pub use controller::{DEFAULT_QUERY_LIMIT, QueryLimit, QueryTicket, SearchController, SearchPhase};
pub use index::{SnapshotIndex, SnapshotLabel};
pub use palette::{Palette, PaletteEntry};
pub use render::{FocusPoint, GatewayCard, Overlay, RenderOutput, render};
