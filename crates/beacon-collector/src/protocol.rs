//! Collect request wire format: a JSON `{type, payload}` body POSTed to
//! `<endpoint root><collect path>`.

use beacon_core::errors::TransportError;
use beacon_core::models::Beacon;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Join the endpoint root and the collect path.
pub fn collect_endpoint(root: &str, collect_path: &str) -> String {
    format!("{root}{collect_path}")
}

pub fn encode_beacon(beacon: &Beacon) -> Result<String, TransportError> {
    serde_json::to_string(beacon).map_err(|e| TransportError::Serialization {
        reason: e.to_string(),
    })
}
