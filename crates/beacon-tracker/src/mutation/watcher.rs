use std::sync::{Arc, Mutex};

use beacon_core::traits::{
    MutationCallback, MutationObserverApi, MutationRecord, NodeTree, ObservationHandle,
    ObserveOptions,
};

use crate::binding::EventBinder;
use crate::sync::lock;

/// Binds each node the host reports as inserted, without re-scanning the
/// tree. Records arrive batched and asynchronously; binding a node the
/// navigation re-scan already bound is a no-op.
pub struct MutationWatcher {
    handle: Mutex<Option<Box<dyn ObservationHandle>>>,
}

impl MutationWatcher {
    /// Start observing the document root. Returns `None` when the host has
    /// no mutation observation or no root to observe.
    pub fn start(
        observer: Option<Arc<dyn MutationObserverApi>>,
        tree: &dyn NodeTree,
        binder: Arc<EventBinder>,
    ) -> Option<Self> {
        let Some(observer) = observer else {
            tracing::debug!("mutation: observation unsupported, relying on re-scans");
            return None;
        };
        let Some(root) = tree.root() else {
            tracing::debug!("mutation: no document root to observe");
            return None;
        };

        let callback: MutationCallback = Arc::new(move |records: &[MutationRecord]| {
            for record in records {
                for node in &record.added_nodes {
                    binder.bind_node(*node);
                }
            }
        });
        let handle = observer.observe(root, ObserveOptions::SUBTREE, callback);
        tracing::debug!("mutation: observing document");
        Some(Self {
            handle: Mutex::new(Some(handle)),
        })
    }

    pub fn is_active(&self) -> bool {
        lock(&self.handle).is_some()
    }

    /// Stop observing. Idempotent.
    pub fn disconnect(&self) {
        if let Some(handle) = lock(&self.handle).take() {
            handle.disconnect();
            tracing::debug!("mutation: observer disconnected");
        }
    }
}

impl std::fmt::Debug for MutationWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationWatcher")
            .field("active", &self.is_active())
            .finish()
    }
}
