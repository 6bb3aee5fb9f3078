//! Tracker startup and shutdown.

use std::sync::Arc;

use beacon_collector::{CollectorClient, CollectorConfig, HttpTransport, HttpTransportConfig};
use beacon_core::config::{resolve, Activation, InertReason, TrackerConfig, TrackerSettings};
use beacon_core::constants::VERSION;
use beacon_core::models::NavigationState;
use beacon_core::traits::{BeaconTransport, HostEnvironment};
use beacon_core::BeaconResult;
use tokio::runtime::Handle;

use crate::api::{self as entry_point, TrackerApi};
use crate::binding::{BindingGrammar, EventBinder};
use crate::mutation::MutationWatcher;
use crate::navigation::{NavigationTracker, SharedNavigation};

/// Outcome of starting the tracker on a page.
#[derive(Debug)]
pub enum Tracker {
    Active(ActiveTracker),
    /// Gated off. Nothing was installed and no request will ever be made.
    Inert(InertReason),
}

impl Tracker {
    /// Start on `host`, delivering beacons over HTTP.
    pub fn start(
        host: Arc<dyn HostEnvironment>,
        settings: &TrackerSettings,
        runtime: Handle,
    ) -> BeaconResult<Self> {
        settings.validate()?;
        let config = match activate(host.as_ref()) {
            Activation::Active(config) => config,
            Activation::Inert(reason) => return Ok(Self::Inert(reason)),
        };
        let transport = HttpTransport::new(HttpTransportConfig::from(settings))?;
        let active = ActiveTracker::start(host, config, settings, Arc::new(transport), runtime)?;
        Ok(Self::Active(active))
    }

    /// Start on `host` with a caller-supplied transport.
    pub fn start_with_transport(
        host: Arc<dyn HostEnvironment>,
        settings: &TrackerSettings,
        transport: Arc<dyn BeaconTransport>,
        runtime: Handle,
    ) -> BeaconResult<Self> {
        settings.validate()?;
        match activate(host.as_ref()) {
            Activation::Active(config) => Ok(Self::Active(ActiveTracker::start(
                host, config, settings, transport, runtime,
            )?)),
            Activation::Inert(reason) => Ok(Self::Inert(reason)),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveTracker> {
        match self {
            Self::Active(tracker) => Some(tracker),
            Self::Inert(_) => None,
        }
    }

    pub fn inert_reason(&self) -> Option<InertReason> {
        match self {
            Self::Active(_) => None,
            Self::Inert(reason) => Some(*reason),
        }
    }

    /// Shut down an active tracker. No-op when inert.
    pub fn shutdown(&self) {
        if let Self::Active(tracker) = self {
            tracker.shutdown();
        }
    }
}

fn activate(host: &dyn HostEnvironment) -> Activation {
    let embedding = host.embedding_element();
    let page = host.page();
    let activation = resolve(embedding.as_ref(), &page.hostname, &host.do_not_track());
    if let Activation::Inert(reason) = &activation {
        tracing::trace!(?reason, "tracker: inert");
    }
    activation
}

/// A running tracker and the components it wired together.
pub struct ActiveTracker {
    config: TrackerConfig,
    collector: Arc<CollectorClient>,
    navigation: SharedNavigation,
    binder: Arc<EventBinder>,
    navigation_tracker: Option<Arc<NavigationTracker>>,
    watcher: Option<MutationWatcher>,
    api: Arc<TrackerApi>,
    owns_entry_point: bool,
}

impl ActiveTracker {
    fn start(
        host: Arc<dyn HostEnvironment>,
        config: TrackerConfig,
        settings: &TrackerSettings,
        transport: Arc<dyn BeaconTransport>,
        runtime: Handle,
    ) -> BeaconResult<Self> {
        let page = host.page();
        let collector = Arc::new(CollectorClient::new(
            CollectorConfig::from_parts(&config, &page, settings),
            transport,
            host.session_storage(),
            runtime.clone(),
        ));
        let navigation =
            SharedNavigation::new(NavigationState::new(page.initial_url(), page.referrer.clone()));
        let tree = host.node_tree();
        let binder = Arc::new(EventBinder::new(
            Arc::clone(&tree),
            BindingGrammar::new(&settings.binding_prefix)?,
            Arc::clone(&collector),
            navigation.clone(),
        ));

        let api = Arc::new(TrackerApi::new(Arc::clone(&collector), navigation.clone()));
        let globals = host.globals();
        let owns_entry_point =
            entry_point::install(globals.as_ref(), &settings.entry_point, Arc::clone(&api));

        let navigation_tracker = if config.auto_track {
            let nav = Arc::new(NavigationTracker::new(
                navigation.clone(),
                Arc::clone(&binder),
                Arc::clone(&collector),
                settings.rescan_delay(),
                runtime,
            ));
            nav.install(host.history().as_ref());

            let initial = navigation.snapshot();
            collector.pageview(&initial.url, &initial.referrer, None);
            binder.scan();
            Some(nav)
        } else {
            None
        };

        let watcher = if config.observe_mutations {
            MutationWatcher::start(host.mutation_observer(), tree.as_ref(), Arc::clone(&binder))
        } else {
            None
        };

        tracing::info!(
            version = VERSION,
            website = %config.website,
            endpoint = collector.endpoint(),
            auto_track = config.auto_track,
            observing = watcher.is_some(),
            "tracker: started"
        );

        Ok(Self {
            config,
            collector,
            navigation,
            binder,
            navigation_tracker,
            watcher,
            api,
            owns_entry_point,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn collector(&self) -> &Arc<CollectorClient> {
        &self.collector
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation.snapshot()
    }

    pub fn binder(&self) -> &Arc<EventBinder> {
        &self.binder
    }

    /// This tracker's entry point. It is the installed one only when
    /// [`Self::owns_entry_point`] is true.
    pub fn api(&self) -> &Arc<TrackerApi> {
        &self.api
    }

    pub fn owns_entry_point(&self) -> bool {
        self.owns_entry_point
    }

    pub fn is_tracking_navigation(&self) -> bool {
        self.navigation_tracker
            .as_ref()
            .is_some_and(|nav| nav.is_enabled())
    }

    pub fn is_observing(&self) -> bool {
        self.watcher.as_ref().is_some_and(MutationWatcher::is_active)
    }

    /// Stop observing mutations, detach every listener, and make the history
    /// hooks pass-through. The installed entry point keeps working.
    pub fn shutdown(&self) {
        if let Some(watcher) = &self.watcher {
            watcher.disconnect();
        }
        if let Some(nav) = &self.navigation_tracker {
            nav.disable();
        }
        let removed = self.binder.remove_all();
        tracing::info!(removed, "tracker: shut down");
    }
}

impl std::fmt::Debug for ActiveTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveTracker")
            .field("config", &self.config)
            .field("navigation", &self.navigation.snapshot())
            .field("binder", &self.binder)
            .field("watcher", &self.watcher)
            .finish()
    }
}
