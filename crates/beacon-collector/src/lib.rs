//! # beacon-collector
//!
//! Collector client for the Beacon tracker. Serializes beacons, sends them
//! to the collection endpoint on detached tasks, and keeps the dedupe token
//! the endpoint hands back.
//!
//! Delivery is best-effort: no retries, no surfaced errors, no cancellation.
//!
//! ## Modules
//!
//! - `client`: `CollectorClient`, fire-and-forget emission
//! - `protocol`: endpoint url and request body encoding
//! - `token`: `TokenCache` over session storage
//! - `transport`: `HttpTransport` backed by reqwest

pub mod client;
pub mod protocol;
pub mod token;
pub mod transport;

pub use client::{CollectorClient, CollectorConfig};
pub use protocol::{collect_endpoint, encode_beacon};
pub use token::TokenCache;
pub use transport::{HttpTransport, HttpTransportConfig};

/// Url parser shared with the tracker for navigation-target resolution.
pub use reqwest::Url;
