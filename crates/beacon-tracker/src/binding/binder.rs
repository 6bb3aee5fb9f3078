//! EventBinder: attaches and detaches declarative interaction listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use beacon_collector::CollectorClient;
use beacon_core::traits::{Listener, ListenerCallback, ListenerId, ListenerOptions, NodeId, NodeTree};
use beacon_core::tracing::names;

use super::{BindingGrammar, BindingKey, BindingToken, ListenerRegistry};
use crate::navigation::SharedNavigation;
use crate::sync::lock;

/// Binds every class token matching the grammar to a capture-phase listener
/// that emits an event beacon with the navigation url current at fire time.
///
/// Every attached listener is recorded in the registry, and only
/// [`EventBinder::remove_all`] detaches, so attach and detach stay symmetric.
pub struct EventBinder {
    tree: Arc<dyn NodeTree>,
    grammar: BindingGrammar,
    collector: Arc<CollectorClient>,
    navigation: SharedNavigation,
    registry: Mutex<ListenerRegistry>,
    next_listener: AtomicU64,
}

impl EventBinder {
    pub fn new(
        tree: Arc<dyn NodeTree>,
        grammar: BindingGrammar,
        collector: Arc<CollectorClient>,
        navigation: SharedNavigation,
    ) -> Self {
        Self {
            tree,
            grammar,
            collector,
            navigation,
            registry: Mutex::new(ListenerRegistry::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    pub fn grammar(&self) -> &BindingGrammar {
        &self.grammar
    }

    /// Bind every token declared on `node` that is not bound yet. Returns the
    /// number of listeners attached by this call.
    pub fn bind_node(&self, node: NodeId) -> usize {
        let Some(class_name) = self.tree.class_name(node) else {
            return 0;
        };
        let mut attached = 0;
        for token in self.grammar.parse_class_name(&class_name) {
            if self.attach(node, token) {
                attached += 1;
            }
        }
        attached
    }

    /// Bind every node whose class attribute carries the binding prefix.
    pub fn scan(&self) -> usize {
        let _span = tracing::debug_span!(names::SCAN).entered();
        let nodes = self.tree.query_class_fragment(self.grammar.fragment());
        let attached: usize = nodes.iter().map(|node| self.bind_node(*node)).sum();
        tracing::debug!(candidates = nodes.len(), attached, "binder: scan complete");
        attached
    }

    /// Detach every registered listener. Returns how many were detached.
    pub fn remove_all(&self) -> usize {
        let drained = lock(&self.registry).drain();
        for (key, listener) in &drained {
            self.tree.remove_event_listener(
                key.node,
                &key.token.event_type,
                *listener,
                ListenerOptions::CAPTURE,
            );
        }
        if !drained.is_empty() {
            tracing::debug!(removed = drained.len(), "binder: listeners detached");
        }
        drained.len()
    }

    /// Number of listeners currently attached.
    pub fn bound_count(&self) -> usize {
        lock(&self.registry).len()
    }

    // The key is reserved before the host attach and confirmed after it, so
    // no lock is held while the host runs. A remove_all that drains the
    // reservation in between wins, and the late listener is detached again.
    fn attach(&self, node: NodeId, token: BindingToken) -> bool {
        let key = BindingKey { node, token };
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        if !lock(&self.registry).insert_if_absent(key.clone(), id) {
            return false;
        }

        let listener = Listener::new(id, self.listener_callback(&key.token));
        self.tree.add_event_listener(
            node,
            &key.token.event_type,
            listener,
            ListenerOptions::CAPTURE,
        );

        if !lock(&self.registry).holds(&key, id) {
            self.tree.remove_event_listener(
                node,
                &key.token.event_type,
                id,
                ListenerOptions::CAPTURE,
            );
            tracing::trace!(node = node.0, "binder: attach superseded by removal");
            return false;
        }
        tracing::trace!(
            node = node.0,
            event_type = %key.token.event_type,
            event_value = %key.token.event_value,
            "binder: listener attached"
        );
        true
    }

    fn listener_callback(&self, token: &BindingToken) -> ListenerCallback {
        let collector = Arc::clone(&self.collector);
        let navigation = self.navigation.clone();
        let BindingToken {
            event_type,
            event_value,
        } = token.clone();
        Arc::new(move || {
            let url = navigation.current_url();
            collector.event(Some(&event_type), Some(&event_value), &url, None);
        })
    }
}

impl std::fmt::Debug for EventBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBinder")
            .field("prefix", &self.grammar.fragment())
            .field("bound", &self.bound_count())
            .finish()
    }
}
