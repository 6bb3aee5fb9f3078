//! NavigationTracker: pageviews for programmatic route changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use beacon_collector::CollectorClient;
use beacon_core::traits::{History, HistoryCall, HistoryMethod};
use beacon_core::tracing::names;
use tokio::runtime::Handle;

use super::{resolve_path, HookedPrimitive, NavigationHook, SharedNavigation};
use crate::binding::EventBinder;

/// Observes push-style and replace-style route changes through hooked
/// history primitives.
///
/// Each intercepted change detaches every bound listener, advances the
/// navigation state, emits a pageview, and schedules a re-scan after a fixed
/// delay. The delay is a heuristic: a view the host renders later than that
/// is only bound if the mutation watcher sees it.
pub struct NavigationTracker {
    navigation: SharedNavigation,
    binder: Arc<EventBinder>,
    collector: Arc<CollectorClient>,
    rescan_delay: Duration,
    runtime: Handle,
    enabled: Arc<AtomicBool>,
}

impl NavigationTracker {
    pub fn new(
        navigation: SharedNavigation,
        binder: Arc<EventBinder>,
        collector: Arc<CollectorClient>,
        rescan_delay: Duration,
        runtime: Handle,
    ) -> Self {
        Self {
            navigation,
            binder,
            collector,
            rescan_delay,
            runtime,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Replace both history primitives with hooked decorators of the ones
    /// currently installed.
    pub fn install(self: &Arc<Self>, history: &dyn History) {
        for method in HistoryMethod::ALL {
            let original = history.primitive(method);
            let tracker = Arc::clone(self);
            let hook: NavigationHook = Arc::new(move |method: HistoryMethod, call: &HistoryCall| {
                tracker.on_navigation(method, call)
            });
            history.set_primitive(method, Arc::new(HookedPrimitive::new(method, original, hook)));
        }
        tracing::debug!("navigation: history hooks installed");
    }

    /// Handle one intercepted call. Calls without a target url change no
    /// location and are only forwarded.
    pub fn on_navigation(&self, method: HistoryMethod, call: &HistoryCall) {
        if !self.is_enabled() {
            return;
        }
        let Some(target) = call.url.as_deref() else {
            return;
        };
        let _span = tracing::debug_span!(names::NAVIGATION, method = method.as_str()).entered();

        self.binder.remove_all();
        let state = self.navigation.advance(resolve_path(target));
        tracing::debug!(url = %state.url, referrer = %state.referrer, "navigation: route changed");
        self.collector.pageview(&state.url, &state.referrer, None);
        self.schedule_rescan();
    }

    /// Make the hooks pass-through and drop any pending re-scan.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn rescan_delay(&self) -> Duration {
        self.rescan_delay
    }

    fn schedule_rescan(&self) {
        let binder = Arc::clone(&self.binder);
        let enabled = Arc::clone(&self.enabled);
        let delay = self.rescan_delay;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if enabled.load(Ordering::SeqCst) {
                binder.scan();
            }
        });
    }
}

impl std::fmt::Debug for NavigationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationTracker")
            .field("navigation", &self.navigation.snapshot())
            .field("rescan_delay", &self.rescan_delay)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
