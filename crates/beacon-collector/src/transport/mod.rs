//! Transport layer: reqwest-backed HTTP delivery of encoded beacons.

pub mod http_client;

pub use http_client::{HttpTransport, HttpTransportConfig};
