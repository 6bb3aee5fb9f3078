//! Which bindings are currently attached, and under which listener id.

use std::collections::HashMap;

use beacon_core::traits::{ListenerId, NodeId};

use super::BindingToken;

/// One binding: a node plus the token declared on it. A node with several
/// tokens holds several independent bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub node: NodeId,
    pub token: BindingToken,
}

/// Membership is checked before every attach, so the navigation re-scan and
/// the mutation watcher can both offer the same node without doubling it.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: HashMap<BindingKey, ListenerId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &BindingKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Record `listener` for `key`. Returns false, leaving the registry
    /// unchanged, when the key is already bound.
    pub fn insert_if_absent(&mut self, key: BindingKey, listener: ListenerId) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, listener);
        true
    }

    /// Whether `key` is still registered under exactly `listener`.
    pub fn holds(&self, key: &BindingKey, listener: ListenerId) -> bool {
        self.entries.get(key) == Some(&listener)
    }

    /// Remove and return every registration.
    pub fn drain(&mut self) -> Vec<(BindingKey, ListenerId)> {
        self.entries.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
