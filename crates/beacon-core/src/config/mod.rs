//! Configuration for Beacon.
//! Embedding attributes resolve per page into `TrackerConfig`; deployment
//! knobs live in TOML-backed `TrackerSettings`.

pub mod defaults;
pub mod resolver;
pub mod tracker_settings;

pub use resolver::{resolve, Activation, InertReason, TrackerConfig};
pub use tracker_settings::TrackerSettings;
