//! Simulated node tree with capture-phase listener dispatch and batched
//! mutation delivery.
//!
//! Mutation records queue up while at least one observer is connected and
//! reach observers only on `flush_mutations`, mirroring the asynchronous,
//! batched delivery of a real page.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use beacon_core::traits::{
    Listener, ListenerId, ListenerOptions, MutationCallback, MutationKind, MutationObserverApi,
    MutationRecord, NodeId, NodeTree, ObservationHandle, ObserveOptions,
};

const ROOT: NodeId = NodeId(0);

struct AttachedListener {
    event_type: String,
    listener: Listener,
    options: ListenerOptions,
}

struct FakeNode {
    /// `None` for text nodes.
    class_name: Option<String>,
    attached: bool,
    listeners: Vec<AttachedListener>,
}

struct Observer {
    callback: MutationCallback,
    connected: Arc<AtomicBool>,
}

#[derive(Default)]
struct DocumentState {
    next_id: u64,
    nodes: BTreeMap<NodeId, FakeNode>,
    pending: Vec<MutationRecord>,
    observers: Vec<Observer>,
}

impl DocumentState {
    fn has_observers(&self) -> bool {
        self.observers
            .iter()
            .any(|o| o.connected.load(Ordering::SeqCst))
    }

    fn record(&mut self, record: MutationRecord) {
        if self.has_observers() {
            self.pending.push(record);
        }
    }

    fn node_mut(&mut self, node: NodeId) -> &mut FakeNode {
        self.nodes
            .get_mut(&node)
            .unwrap_or_else(|| panic!("unknown node {node:?}"))
    }
}

pub struct FakeDocument {
    state: Mutex<DocumentState>,
    has_root: bool,
}

struct FakeObservation {
    connected: Arc<AtomicBool>,
}

impl ObservationHandle for FakeObservation {
    fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        let mut state = DocumentState {
            next_id: 1,
            ..Default::default()
        };
        state.nodes.insert(
            ROOT,
            FakeNode {
                class_name: Some(String::new()),
                attached: true,
                listeners: Vec::new(),
            },
        );
        Self {
            state: Mutex::new(state),
            has_root: true,
        }
    }

    /// A document with neither a root element nor a body.
    pub fn without_root() -> Self {
        Self {
            has_root: false,
            ..Self::new()
        }
    }

    /// Insert an element with the given class attribute under the root.
    pub fn insert_element(&self, class_name: &str) -> NodeId {
        self.insert(Some(class_name.to_string()))
    }

    pub fn insert_text(&self) -> NodeId {
        self.insert(None)
    }

    fn insert(&self, class_name: Option<String>) -> NodeId {
        let mut state = self.state.lock().unwrap();
        let id = NodeId(state.next_id);
        state.next_id += 1;
        state.nodes.insert(
            id,
            FakeNode {
                class_name,
                attached: true,
                listeners: Vec::new(),
            },
        );
        state.record(child_list(vec![id], Vec::new()));
        id
    }

    /// Remove a node from the tree. The node object, and any listeners on
    /// it, survive until it is re-attached or forgotten.
    pub fn detach(&self, node: NodeId) {
        let mut state = self.state.lock().unwrap();
        state.node_mut(node).attached = false;
        state.record(child_list(Vec::new(), vec![node]));
    }

    pub fn reattach(&self, node: NodeId) {
        let mut state = self.state.lock().unwrap();
        state.node_mut(node).attached = true;
        state.record(child_list(vec![node], Vec::new()));
    }

    pub fn set_class(&self, node: NodeId, class_name: &str) {
        let mut state = self.state.lock().unwrap();
        state.node_mut(node).class_name = Some(class_name.to_string());
        state.record(MutationRecord {
            kind: MutationKind::Attributes,
            target: node,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some("class".to_string()),
        });
    }

    /// Fire `event_type` on `node`, returning how many listeners ran.
    /// Capture-phase listeners run before bubbling-phase ones.
    pub fn dispatch(&self, node: NodeId, event_type: &str) -> usize {
        let mut listeners: Vec<(bool, Listener)> = {
            let state = self.state.lock().unwrap();
            match state.nodes.get(&node) {
                Some(n) => n
                    .listeners
                    .iter()
                    .filter(|l| l.event_type == event_type)
                    .map(|l| (l.options.capture, l.listener.clone()))
                    .collect(),
                None => Vec::new(),
            }
        };
        listeners.sort_by_key(|(capture, _)| !*capture);
        for (_, listener) in &listeners {
            listener.invoke();
        }
        listeners.len()
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        let state = self.state.lock().unwrap();
        state.nodes.get(&node).map_or(0, |n| n.listeners.len())
    }

    pub fn capture_listener_count(&self, node: NodeId) -> usize {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .get(&node)
            .map_or(0, |n| n.listeners.iter().filter(|l| l.options.capture).count())
    }

    pub fn total_listeners(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.nodes.values().map(|n| n.listeners.len()).sum()
    }

    pub fn connected_observers(&self) -> usize {
        let state = self.state.lock().unwrap();
        state
            .observers
            .iter()
            .filter(|o| o.connected.load(Ordering::SeqCst))
            .count()
    }

    /// Deliver queued records to every connected observer as one batch.
    /// Returns the number of records delivered.
    pub fn flush_mutations(&self) -> usize {
        let (records, callbacks) = {
            let mut state = self.state.lock().unwrap();
            let records = std::mem::take(&mut state.pending);
            let callbacks: Vec<MutationCallback> = state
                .observers
                .iter()
                .filter(|o| o.connected.load(Ordering::SeqCst))
                .map(|o| Arc::clone(&o.callback))
                .collect();
            (records, callbacks)
        };
        if records.is_empty() || callbacks.is_empty() {
            return 0;
        }
        for callback in callbacks {
            callback(&records);
        }
        records.len()
    }
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn child_list(added: Vec<NodeId>, removed: Vec<NodeId>) -> MutationRecord {
    MutationRecord {
        kind: MutationKind::ChildList,
        target: ROOT,
        added_nodes: added,
        removed_nodes: removed,
        attribute_name: None,
    }
}

impl NodeTree for FakeDocument {
    fn root(&self) -> Option<NodeId> {
        self.has_root.then_some(ROOT)
    }

    fn query_class_fragment(&self, fragment: &str) -> Vec<NodeId> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .filter(|(_, n)| n.attached)
            .filter(|(_, n)| n.class_name.as_deref().is_some_and(|c| c.contains(fragment)))
            .map(|(id, _)| *id)
            .collect()
    }

    fn class_name(&self, node: NodeId) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.nodes.get(&node).and_then(|n| n.class_name.clone())
    }

    fn add_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
        options: ListenerOptions,
    ) {
        let mut state = self.state.lock().unwrap();
        if let Some(n) = state.nodes.get_mut(&node) {
            n.listeners.push(AttachedListener {
                event_type: event_type.to_string(),
                listener,
                options,
            });
        }
    }

    fn remove_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: ListenerId,
        options: ListenerOptions,
    ) {
        let mut state = self.state.lock().unwrap();
        if let Some(n) = state.nodes.get_mut(&node) {
            n.listeners.retain(|l| {
                !(l.event_type == event_type && l.listener.id == listener && l.options == options)
            });
        }
    }
}

impl MutationObserverApi for FakeDocument {
    fn observe(
        &self,
        _target: NodeId,
        _options: ObserveOptions,
        callback: MutationCallback,
    ) -> Box<dyn ObservationHandle> {
        let connected = Arc::new(AtomicBool::new(true));
        self.state.lock().unwrap().observers.push(Observer {
            callback,
            connected: Arc::clone(&connected),
        });
        Box::new(FakeObservation { connected })
    }
}
