use std::collections::BTreeMap;
use std::sync::Arc;

use super::{GlobalScope, History, MutationObserverApi, NodeTree, SessionStorage};
use crate::models::{DoNotTrackSignal, PageContext};

/// The reference element the tracker was embedded with: its source url and
/// its attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingElement {
    pub src: String,
    pub attributes: BTreeMap<String, String>,
}

impl EmbeddingElement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Aggregate access to everything the tracker reads from, or installs into,
/// the embedding page.
pub trait HostEnvironment: Send + Sync {
    /// The embedding reference element, if it can be located.
    fn embedding_element(&self) -> Option<EmbeddingElement>;

    /// Location, referrer, screen, and language at load time.
    fn page(&self) -> PageContext;

    fn do_not_track(&self) -> DoNotTrackSignal;

    fn node_tree(&self) -> Arc<dyn NodeTree>;

    fn history(&self) -> Arc<dyn History>;

    fn session_storage(&self) -> Arc<dyn SessionStorage>;

    /// Tree-mutation observation, when the host supports it.
    fn mutation_observer(&self) -> Option<Arc<dyn MutationObserverApi>>;

    fn globals(&self) -> Arc<dyn GlobalScope>;
}
