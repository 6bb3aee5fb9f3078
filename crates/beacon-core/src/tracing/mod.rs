//! Tracing initialization and span names.

pub mod setup;

pub use setup::{init_tracing, init_tracing_for, init_tracing_with_filter, is_initialized};

/// Span names as constants for programmatic use.
pub mod names {
    pub const NAVIGATION: &str = "beacon.navigation";
    pub const SCAN: &str = "beacon.scan";
    pub const DELIVERY: &str = "beacon.delivery";
}
