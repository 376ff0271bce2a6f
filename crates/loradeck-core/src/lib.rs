//! Domain layer for the loradeck console.
//!
//! Everything here is I/O-free: wire responses from [`loradeck_api`]
//! are converted into strict domain types, and the search and remote
//! modules expose plain state machines the terminal layer drives.

pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod search;

pub use error::CoreError;
