use async_trait::async_trait;

use crate::errors::TransportError;

/// A completed HTTP exchange. Any status counts as a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectResponse {
    pub status: u16,
    pub body: String,
}

/// Delivers one serialized beacon to the collection endpoint.
#[async_trait]
pub trait BeaconTransport: Send + Sync {
    async fn send(&self, endpoint: &str, body: String) -> Result<CollectResponse, TransportError>;
}
