use std::sync::Arc;

use beacon_collector::CollectorClient;
use beacon_core::traits::{GlobalScope, GlobalService};

use crate::navigation::SharedNavigation;

/// Arguments of an explicit pageview. Unset fields default to the current
/// navigation state and the embedding site identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub url: Option<String>,
    pub referrer: Option<String>,
    pub website: Option<String>,
}

/// Arguments of an explicit event. The type defaults to `"custom"`, the url
/// to the current navigation url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOptions {
    pub event_value: Option<String>,
    pub event_type: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
}

impl EventOptions {
    pub fn value(event_value: impl Into<String>) -> Self {
        Self {
            event_value: Some(event_value.into()),
            ..Self::default()
        }
    }
}

/// Manual tracking surface for host code.
pub struct TrackerApi {
    collector: Arc<CollectorClient>,
    navigation: SharedNavigation,
}

impl TrackerApi {
    pub fn new(collector: Arc<CollectorClient>, navigation: SharedNavigation) -> Self {
        Self {
            collector,
            navigation,
        }
    }

    /// Shorthand: a `"custom"` event carrying `event_value`.
    pub fn track(&self, event_value: &str) {
        self.track_event(EventOptions::value(event_value));
    }

    pub fn track_view(&self, options: ViewOptions) {
        let state = self.navigation.snapshot();
        self.collector.pageview(
            options.url.as_deref().unwrap_or(&state.url),
            options.referrer.as_deref().unwrap_or(&state.referrer),
            options.website.as_deref(),
        );
    }

    pub fn track_event(&self, options: EventOptions) {
        let url = match options.url {
            Some(url) => url,
            None => self.navigation.current_url(),
        };
        self.collector.event(
            options.event_type.as_deref(),
            options.event_value.as_deref(),
            &url,
            options.website.as_deref(),
        );
    }
}

impl std::fmt::Debug for TrackerApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerApi")
            .field("website", &self.collector.website())
            .finish()
    }
}

/// Bind `api` under `name` unless an entry point is already bound there.
/// Returns true when this call installed it.
pub fn install(globals: &dyn GlobalScope, name: &str, api: Arc<TrackerApi>) -> bool {
    let service: GlobalService = api;
    let installed = globals.define_if_absent(name, service);
    if installed {
        tracing::debug!("api: entry point installed as {name:?}");
    } else {
        tracing::debug!("api: {name:?} already bound, keeping existing entry point");
    }
    installed
}

/// The entry point bound under `name`, if it is a tracker entry point.
pub fn lookup(globals: &dyn GlobalScope, name: &str) -> Option<Arc<TrackerApi>> {
    globals.lookup(name)?.downcast::<TrackerApi>().ok()
}
