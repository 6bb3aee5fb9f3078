//! Data model: outbound beacons, navigation state, and the page snapshot
//! taken once at load time.

pub mod beacon;
pub mod navigation;
pub mod page;
pub mod privacy;

pub use beacon::{Beacon, BeaconType, EventPayload, PageMetadata, PageviewPayload};
pub use navigation::NavigationState;
pub use page::{PageContext, ScreenSize};
pub use privacy::DoNotTrackSignal;
