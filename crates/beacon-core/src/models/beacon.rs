//! Beacon wire model.
//!
//! Serializes to `{"type": "pageview" | "event", "payload": {...}}`.
//! The payload variant and the `type` tag come from the same enum arm, so a
//! beacon can never carry a tag that disagrees with its payload.

use serde::{Deserialize, Serialize};

/// Fields shared by every payload. `hostname`, `screen`, and `language` are
/// fixed for the page's lifetime; `cache` is the replayed dedupe token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub website: String,
    pub hostname: String,
    pub screen: String,
    pub language: String,
    pub cache: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageviewPayload {
    pub url: String,
    pub referrer: String,
    #[serde(flatten)]
    pub meta: PageMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_value: Option<String>,
    pub url: String,
    #[serde(flatten)]
    pub meta: PageMetadata,
}

/// One outbound telemetry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Beacon {
    Pageview(PageviewPayload),
    Event(EventPayload),
}

/// Discriminant of a [`Beacon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeaconType {
    Pageview,
    Event,
}

impl BeaconType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pageview => "pageview",
            Self::Event => "event",
        }
    }
}

impl Beacon {
    pub fn beacon_type(&self) -> BeaconType {
        match self {
            Self::Pageview(_) => BeaconType::Pageview,
            Self::Event(_) => BeaconType::Event,
        }
    }

    /// The navigation url this beacon was emitted for.
    pub fn url(&self) -> &str {
        match self {
            Self::Pageview(p) => &p.url,
            Self::Event(e) => &e.url,
        }
    }

    pub fn meta(&self) -> &PageMetadata {
        match self {
            Self::Pageview(p) => &p.meta,
            Self::Event(e) => &e.meta,
        }
    }
}
