//! Page node tree and event-listener attachment.

use std::fmt;
use std::sync::Arc;

/// Opaque reference to a node. Holding one does not keep the node alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Identity of an attached listener, used to detach exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

pub type ListenerCallback = Arc<dyn Fn() + Send + Sync>;

/// A callback plus the identity the host uses to remove it again.
#[derive(Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub callback: ListenerCallback,
}

impl Listener {
    pub fn new(id: ListenerId, callback: ListenerCallback) -> Self {
        Self { id, callback }
    }

    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// Fire during the capturing phase, before target handlers run.
    pub capture: bool,
}

impl ListenerOptions {
    pub const CAPTURE: Self = Self { capture: true };
}

pub trait NodeTree: Send + Sync {
    /// The document root element, if the document has one.
    fn root(&self) -> Option<NodeId>;

    /// Every attached element whose class attribute contains `fragment`
    /// as a substring, in document order.
    fn query_class_fragment(&self, fragment: &str) -> Vec<NodeId>;

    /// The raw class attribute. `None` for unknown or non-element nodes.
    fn class_name(&self, node: NodeId) -> Option<String>;

    fn add_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
        options: ListenerOptions,
    );

    /// Detach a listener. Unknown nodes or listeners are ignored.
    fn remove_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: ListenerId,
        options: ListenerOptions,
    );
}
