//! # beacon-core
//!
//! Foundation crate for the Beacon page tracker.
//! Defines the beacon wire model, the host-environment traits the tracker
//! runs against, errors, configuration, constants, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{Activation, InertReason, TrackerConfig, TrackerSettings};
pub use errors::{BeaconError, BeaconResult};
pub use models::{Beacon, BeaconType, NavigationState, PageContext};
