//! The public entry point installed into the host's global scope.

pub mod entry_point;

pub use entry_point::{install, lookup, EventOptions, TrackerApi, ViewOptions};
