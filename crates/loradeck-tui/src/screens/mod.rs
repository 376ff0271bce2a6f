//! Screen components, one per [`ScreenId`](crate::screen::ScreenId).

mod gateways;
mod multicast;
mod search;

use crate::component::Component;
use crate::screen::ScreenId;

pub use gateways::GatewayScreen;
pub use multicast::MulticastScreen;
pub use search::SearchScreen;

/// Build every screen component.
pub fn create_screens(
    default_center: (f64, f64),
    default_limit: u32,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Search,
            Box::new(SearchScreen::new(default_center, default_limit)),
        ),
        (ScreenId::Gateways, Box::new(GatewayScreen::new())),
        (ScreenId::Multicast, Box::new(MulticastScreen::new())),
    ]
}
