//! CollectorClient: fire-and-forget beacon emission.

use std::sync::Arc;

use beacon_core::config::{TrackerConfig, TrackerSettings};
use beacon_core::constants::DEFAULT_EVENT_TYPE;
use beacon_core::errors::ErrorCode;
use beacon_core::models::{Beacon, EventPayload, PageContext, PageMetadata, PageviewPayload};
use beacon_core::traits::{BeaconTransport, SessionStorage};
use beacon_core::tracing::names;
use tokio::runtime::Handle;
use tracing::Instrument;

use crate::protocol::{collect_endpoint, encode_beacon};
use crate::token::TokenCache;

/// Everything the client needs that does not change for the page's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Full collect url.
    pub endpoint: String,
    /// Default site identifier.
    pub website: String,
    pub hostname: String,
    pub screen: String,
    pub language: String,
    pub use_cache: bool,
    pub storage_key: String,
}

impl CollectorConfig {
    pub fn from_parts(config: &TrackerConfig, page: &PageContext, settings: &TrackerSettings) -> Self {
        Self {
            endpoint: collect_endpoint(&config.endpoint_root, &settings.collect_path),
            website: config.website.clone(),
            hostname: page.hostname.clone(),
            screen: page.screen.to_string(),
            language: page.language.clone(),
            use_cache: config.use_cache,
            storage_key: settings.storage_key.clone(),
        }
    }
}

/// Sends beacons to the collection endpoint.
///
/// Every emission spawns a detached task on `runtime`; nothing is awaited,
/// retried, or reported back. Responses may complete in any order, and the
/// last one to complete leaves its token in the cache.
pub struct CollectorClient {
    config: CollectorConfig,
    tokens: TokenCache,
    transport: Arc<dyn BeaconTransport>,
    runtime: Handle,
}

impl CollectorClient {
    pub fn new(
        config: CollectorConfig,
        transport: Arc<dyn BeaconTransport>,
        storage: Arc<dyn SessionStorage>,
        runtime: Handle,
    ) -> Self {
        let tokens = TokenCache::new(storage, config.storage_key.clone(), config.use_cache);
        Self {
            config,
            tokens,
            transport,
            runtime,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn website(&self) -> &str {
        &self.config.website
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Emit a pageview. `website` defaults to the embedding site identifier.
    pub fn pageview(&self, url: &str, referrer: &str, website: Option<&str>) {
        let beacon = Beacon::Pageview(PageviewPayload {
            url: url.to_string(),
            referrer: referrer.to_string(),
            meta: self.metadata(website),
        });
        self.emit(beacon);
    }

    /// Emit an interaction event. `event_type` defaults to `"custom"`.
    pub fn event(
        &self,
        event_type: Option<&str>,
        event_value: Option<&str>,
        url: &str,
        website: Option<&str>,
    ) {
        let beacon = Beacon::Event(EventPayload {
            event_type: event_type.unwrap_or(DEFAULT_EVENT_TYPE).to_string(),
            event_value: event_value.map(str::to_string),
            url: url.to_string(),
            meta: self.metadata(website),
        });
        self.emit(beacon);
    }

    /// Serialize and send `beacon` on a detached task.
    ///
    /// On any completed response, the raw body replaces the cached token
    /// (when caching is enabled). Failures are logged and dropped.
    pub fn emit(&self, beacon: Beacon) {
        let kind = beacon.beacon_type();
        let body = match encode_beacon(&beacon) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("collector: dropping {} beacon: {}", kind.as_str(), e.coded_string());
                return;
            }
        };

        let endpoint = self.config.endpoint.clone();
        let transport = Arc::clone(&self.transport);
        let tokens = self.tokens.clone();
        let span = tracing::debug_span!(names::DELIVERY, kind = kind.as_str(), url = %beacon.url());

        self.runtime.spawn(
            async move {
                match transport.send(&endpoint, body).await {
                    Ok(response) => {
                        tracing::trace!(status = response.status, "collector: beacon delivered");
                        tokens.store(&response.body);
                    }
                    Err(e) => tracing::debug!("collector: beacon lost: {}", e.coded_string()),
                }
            }
            .instrument(span),
        );
    }

    fn metadata(&self, website: Option<&str>) -> PageMetadata {
        PageMetadata {
            website: website.unwrap_or(&self.config.website).to_string(),
            hostname: self.config.hostname.clone(),
            screen: self.config.screen.clone(),
            language: self.config.language.clone(),
            cache: self.tokens.read(),
        }
    }
}

impl std::fmt::Debug for CollectorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorClient")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish()
    }
}
