//! # beacon-tracker
//!
//! Runtime of the Beacon page tracker. Hooks the host's history primitives
//! to report single-page navigations, binds interaction listeners declared
//! through class tokens, keeps those bindings current as the node tree
//! mutates, and installs the public entry point.
//!
//! ## Modules
//!
//! - `binding`: class-token grammar, listener registry, `EventBinder`
//! - `navigation`: navigation state, history hooks, `NavigationTracker`
//! - `mutation`: `MutationWatcher`
//! - `api`: `TrackerApi`, the installed entry point
//! - `tracker`: `Tracker`, startup and shutdown

pub mod api;
pub mod binding;
pub mod mutation;
pub mod navigation;
pub mod tracker;

mod sync;

pub use api::{EventOptions, TrackerApi, ViewOptions};
pub use binding::{BindingGrammar, BindingToken, EventBinder};
pub use mutation::MutationWatcher;
pub use navigation::{NavigationTracker, SharedNavigation};
pub use tracker::{ActiveTracker, Tracker};
