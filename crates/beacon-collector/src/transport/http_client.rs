//! HTTP transport with timeout and gzip. No retry: a failed beacon is lost.

use std::time::Duration;

use async_trait::async_trait;
use beacon_core::config::TrackerSettings;
use beacon_core::errors::TransportError;
use beacon_core::traits::{BeaconTransport, CollectResponse};
use reqwest::header::CONTENT_TYPE;

use crate::protocol::CONTENT_TYPE_JSON;

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Accept gzip-compressed responses.
    pub gzip: bool,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            gzip: true,
        }
    }
}

impl From<&TrackerSettings> for HttpTransportConfig {
    fn from(settings: &TrackerSettings) -> Self {
        Self {
            timeout: settings.request_timeout(),
            ..Self::default()
        }
    }
}

/// Convert a reqwest failure into a TransportError::Network.
fn net_err(e: reqwest::Error) -> TransportError {
    TransportError::Network {
        reason: e.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(config.gzip)
            .build()
            .map_err(|e| TransportError::ClientBuild {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BeaconTransport for HttpTransport {
    async fn send(&self, endpoint: &str, body: String) -> Result<CollectResponse, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body)
            .send()
            .await
            .map_err(net_err)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(net_err)?;
        Ok(CollectResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_follows_settings_timeout() {
        let settings = TrackerSettings {
            request_timeout_secs: 4,
            ..TrackerSettings::default()
        };
        let config = HttpTransportConfig::from(&settings);
        assert_eq!(config.timeout, Duration::from_secs(4));
        assert!(config.gzip);
    }

    #[test]
    fn builds_with_defaults() {
        assert!(HttpTransport::new(HttpTransportConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let transport = HttpTransport::new(HttpTransportConfig {
            timeout: Duration::from_millis(500),
            gzip: false,
        })
        .unwrap();
        let err = transport
            .send("http://127.0.0.1:9/api/collect", "{}".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }
}
