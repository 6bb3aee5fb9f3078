//! Dedupe token cache.

use std::fmt;
use std::sync::Arc;

use beacon_core::errors::ErrorCode;
use beacon_core::traits::SessionStorage;

/// Reads and replaces the dedupe token under one fixed session-storage key.
/// When caching is disabled the storage is never touched.
#[derive(Clone)]
pub struct TokenCache {
    storage: Arc<dyn SessionStorage>,
    key: String,
    enabled: bool,
}

impl TokenCache {
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>, enabled: bool) -> Self {
        Self {
            storage,
            key: key.into(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The token to replay on the next beacon.
    pub fn read(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.storage.get_item(&self.key)
    }

    /// Replace the stored token with a raw response body. Storage failures
    /// are dropped; the next beacon simply carries the older token.
    pub fn store(&self, token: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.storage.set_item(&self.key, token) {
            tracing::debug!("collector: token not cached: {}", e.coded_string());
        }
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .finish()
    }
}
