//! Tree-mutation observation capability.

use std::sync::Arc;

use super::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserveOptions {
    pub attributes: bool,
    pub child_list: bool,
    pub subtree: bool,
}

impl ObserveOptions {
    /// Attribute changes and insertions anywhere below the target.
    pub const SUBTREE: Self = Self {
        attributes: true,
        child_list: true,
        subtree: true,
    };
}

/// Receives batches of records, asynchronously relative to the changes.
pub type MutationCallback = Arc<dyn Fn(&[MutationRecord]) + Send + Sync>;

pub trait ObservationHandle: Send + Sync {
    /// Stop delivery. Idempotent.
    fn disconnect(&self);
}

pub trait MutationObserverApi: Send + Sync {
    fn observe(
        &self,
        target: NodeId,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> Box<dyn ObservationHandle>;
}
