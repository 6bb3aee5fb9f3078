//! A complete simulated host page.

use std::sync::Arc;

use beacon_core::models::{DoNotTrackSignal, PageContext, ScreenSize};
use beacon_core::traits::{
    EmbeddingElement, GlobalScope, History, HostEnvironment, MutationObserverApi, NodeTree,
    SessionStorage,
};

use crate::{FakeDocument, FakeGlobals, FakeHistory, MemoryStorage};

pub const DEFAULT_SCRIPT_SRC: &str = "https://stats.example.com/tracker.js";

pub struct FakePage {
    embedding: Option<EmbeddingElement>,
    page: PageContext,
    dnt: DoNotTrackSignal,
    document: Arc<FakeDocument>,
    history: Arc<FakeHistory>,
    storage: Arc<MemoryStorage>,
    globals: Arc<FakeGlobals>,
    mutation_observer: bool,
}

impl FakePage {
    pub fn builder() -> FakePageBuilder {
        FakePageBuilder::default()
    }

    pub fn document(&self) -> &Arc<FakeDocument> {
        &self.document
    }

    pub fn history(&self) -> &Arc<FakeHistory> {
        &self.history
    }

    pub fn storage(&self) -> &Arc<MemoryStorage> {
        &self.storage
    }

    pub fn globals(&self) -> &Arc<FakeGlobals> {
        &self.globals
    }
}

impl HostEnvironment for FakePage {
    fn embedding_element(&self) -> Option<EmbeddingElement> {
        self.embedding.clone()
    }

    fn page(&self) -> PageContext {
        self.page.clone()
    }

    fn do_not_track(&self) -> DoNotTrackSignal {
        self.dnt.clone()
    }

    fn node_tree(&self) -> Arc<dyn NodeTree> {
        self.document.clone()
    }

    fn history(&self) -> Arc<dyn History> {
        self.history.clone()
    }

    fn session_storage(&self) -> Arc<dyn SessionStorage> {
        self.storage.clone()
    }

    fn mutation_observer(&self) -> Option<Arc<dyn MutationObserverApi>> {
        if !self.mutation_observer {
            return None;
        }
        let observer: Arc<dyn MutationObserverApi> = self.document.clone();
        Some(observer)
    }

    fn globals(&self) -> Arc<dyn GlobalScope> {
        self.globals.clone()
    }
}

/// Builder for [`FakePage`]. Defaults: site `abc123` embedded from
/// `https://stats.example.com/tracker.js` on `example.com/home`, no
/// referrer, mutation observation supported.
pub struct FakePageBuilder {
    embedding: Option<EmbeddingElement>,
    hostname: String,
    pathname: String,
    search: String,
    referrer: String,
    dnt: DoNotTrackSignal,
    document: Option<FakeDocument>,
    globals: Option<Arc<FakeGlobals>>,
    mutation_observer: bool,
}

impl Default for FakePageBuilder {
    fn default() -> Self {
        Self {
            embedding: Some(
                EmbeddingElement::new(DEFAULT_SCRIPT_SRC).with_attribute("data-website-id", "abc123"),
            ),
            hostname: "example.com".to_string(),
            pathname: "/home".to_string(),
            search: String::new(),
            referrer: String::new(),
            dnt: DoNotTrackSignal::default(),
            document: None,
            globals: None,
            mutation_observer: true,
        }
    }
}

impl FakePageBuilder {
    /// Add an attribute to the embedding element.
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        if let Some(el) = self.embedding.take() {
            self.embedding = Some(el.with_attribute(name, value));
        }
        self
    }

    pub fn without_embedding(mut self) -> Self {
        self.embedding = None;
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn path(mut self, pathname: &str, search: &str) -> Self {
        self.pathname = pathname.to_string();
        self.search = search.to_string();
        self
    }

    pub fn referrer(mut self, referrer: &str) -> Self {
        self.referrer = referrer.to_string();
        self
    }

    pub fn do_not_track(mut self, signal: DoNotTrackSignal) -> Self {
        self.dnt = signal;
        self
    }

    pub fn document(mut self, document: FakeDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Share a global scope between pages, as two script tags on one page would.
    pub fn globals(mut self, globals: Arc<FakeGlobals>) -> Self {
        self.globals = Some(globals);
        self
    }

    pub fn without_mutation_observer(mut self) -> Self {
        self.mutation_observer = false;
        self
    }

    pub fn build(self) -> Arc<FakePage> {
        Arc::new(FakePage {
            embedding: self.embedding,
            page: PageContext {
                hostname: self.hostname,
                pathname: self.pathname,
                search: self.search,
                referrer: self.referrer,
                screen: ScreenSize {
                    width: 1920,
                    height: 1080,
                },
                language: "en-US".to_string(),
            },
            dnt: self.dnt,
            document: Arc::new(self.document.unwrap_or_default()),
            history: Arc::new(FakeHistory::new()),
            storage: Arc::new(MemoryStorage::new()),
            globals: self.globals.unwrap_or_default(),
            mutation_observer: self.mutation_observer,
        })
    }
}
