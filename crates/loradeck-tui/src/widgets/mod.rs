//! Shared rendering and input helpers.

pub mod edit;
pub mod fmt;
pub mod geo;
