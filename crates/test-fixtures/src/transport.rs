//! Transport that records beacons instead of sending them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use beacon_core::errors::TransportError;
use beacon_core::traits::{BeaconTransport, CollectResponse};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn beacon_type(&self) -> &str {
        self.body["type"].as_str().unwrap_or_default()
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.body["payload"]
    }

    /// A string field of the payload, or `None` when absent or null.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.payload().get(name).and_then(|v| v.as_str())
    }
}

/// Records every request. Answers request `n` (1-based) with body
/// `token-n`, or fails every request when built with [`Self::failing`].
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    fail: AtomicBool,
    notify: Notify,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let transport = Self::default();
        transport.fail.store(true, Ordering::SeqCst);
        transport
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Wait until at least `count` requests arrived (or a generous timeout
    /// passed) and return everything recorded so far.
    pub async fn wait_for(&self, count: usize) -> Vec<RecordedRequest> {
        let _ = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let notified = self.notify.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                if self.count() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await;
        self.requests()
    }
}

#[async_trait]
impl BeaconTransport for RecordingTransport {
    async fn send(&self, endpoint: &str, body: String) -> Result<CollectResponse, TransportError> {
        let body: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TransportError::Serialization {
                reason: e.to_string(),
            })?;
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(RecordedRequest {
                endpoint: endpoint.to_string(),
                body,
            });
            requests.len()
        };
        self.notify.notify_waiters();

        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Network {
                reason: "connection refused".to_string(),
            });
        }
        Ok(CollectResponse {
            status: 200,
            body: format!("token-{n}"),
        })
    }
}
