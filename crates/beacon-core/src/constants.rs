/// Beacon tracker version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event type used when the caller does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "custom";

/// Separator between the prefix, event type, and event value in a binding class token.
pub const BINDING_SEPARATOR: &str = "--";

/// Name of the embedding attributes read by the config resolver.
pub mod attributes {
    pub const WEBSITE_ID: &str = "data-website-id";
    pub const HOST_URL: &str = "data-host-url";
    pub const AUTO_TRACK: &str = "data-auto-track";
    pub const OBSERVE_MUTATIONS: &str = "data-observe-mutations";
    pub const DO_NOT_TRACK: &str = "data-do-not-track";
    pub const CACHE: &str = "data-cache";
    pub const DOMAINS: &str = "data-domains";
}
