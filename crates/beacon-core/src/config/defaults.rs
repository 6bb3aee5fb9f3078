//! Compiled defaults for `TrackerSettings`.

pub const DEFAULT_BINDING_PREFIX: &str = "beacon";
pub const DEFAULT_STORAGE_KEY: &str = "beacon.cache";
pub const DEFAULT_COLLECT_PATH: &str = "/api/collect";
pub const DEFAULT_ENTRY_POINT: &str = "beacon";
pub const DEFAULT_LOG_FILTER: &str = "beacon=info";

/// Delay between an intercepted navigation and the node-tree re-scan.
/// A heuristic for the host's new view to render, not a completion signal.
pub const DEFAULT_RESCAN_DELAY_MS: u64 = 300;
pub const MAX_RESCAN_DELAY_MS: u64 = 10_000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
