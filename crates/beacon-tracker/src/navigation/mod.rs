//! Single-page navigation tracking through hooked history primitives.

pub mod hook;
pub mod state;
pub mod tracker;
pub mod url;

pub use hook::{HookedPrimitive, NavigationHook};
pub use state::SharedNavigation;
pub use tracker::NavigationTracker;
pub use url::resolve_path;
