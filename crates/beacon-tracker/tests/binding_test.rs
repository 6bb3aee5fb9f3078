//! Tests for declarative binding, the mutation watcher, and listener symmetry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use beacon_collector::{CollectorClient, CollectorConfig};
use beacon_core::config::TrackerSettings;
use beacon_core::models::NavigationState;
use beacon_core::traits::{Listener, ListenerId, ListenerOptions, NodeId, NodeTree};
use beacon_tracker::{BindingGrammar, EventBinder, SharedNavigation, Tracker};
use proptest::prelude::*;
use test_fixtures::{settle, FakeDocument, FakePage, MemoryStorage, RecordingTransport};
use tokio::runtime::Handle;

fn start(page: &Arc<FakePage>) -> (Tracker, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let tracker = Tracker::start_with_transport(
        page.clone(),
        &TrackerSettings::default(),
        transport.clone(),
        Handle::current(),
    )
    .unwrap();
    (tracker, transport)
}

fn events(transport: &RecordingTransport) -> Vec<(String, String, String)> {
    transport
        .requests()
        .iter()
        .filter(|r| r.beacon_type() == "event")
        .map(|r| {
            (
                r.field("event_type").unwrap_or_default().to_string(),
                r.field("event_value").unwrap_or_default().to_string(),
                r.field("url").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

// ── Scan ──────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn initial_scan_binds_capture_listeners() {
    let document = FakeDocument::new();
    let signup = document.insert_element("btn beacon--click--signup");
    let plain = document.insert_element("btn beacon-click-signup");
    let text = document.insert_text();
    let page = FakePage::builder().document(document).build();

    let (tracker, transport) = start(&page);
    transport.wait_for(1).await;

    let doc = page.document();
    assert_eq!(doc.capture_listener_count(signup), 1);
    assert_eq!(doc.listener_count(plain), 0);
    assert_eq!(doc.listener_count(text), 0);
    assert_eq!(tracker.active().unwrap().binder().bound_count(), 1);

    assert_eq!(doc.dispatch(signup, "click"), 1);
    transport.wait_for(2).await;
    assert_eq!(
        events(&transport),
        vec![("click".to_string(), "signup".to_string(), "/home".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn each_token_on_a_node_is_bound_independently() {
    let document = FakeDocument::new();
    let node = document
        .insert_element("beacon--click--cta beacon--mouseover--cta beacon--click--hero_2");
    let page = FakePage::builder().document(document).build();
    let (_tracker, transport) = start(&page);

    assert_eq!(page.document().listener_count(node), 3);
    assert_eq!(page.document().dispatch(node, "click"), 2);
    assert_eq!(page.document().dispatch(node, "mouseover"), 1);
    assert_eq!(page.document().dispatch(node, "keydown"), 0);

    transport.wait_for(4).await;
    let mut values: Vec<_> = events(&transport)
        .into_iter()
        .map(|(t, v, _)| format!("{t}:{v}"))
        .collect();
    values.sort();
    assert_eq!(values, vec!["click:cta", "click:hero_2", "mouseover:cta"]);
}

#[tokio::test(start_paused = true)]
async fn listener_reports_url_current_at_fire_time() {
    let page = FakePage::builder().without_mutation_observer().build();
    let (_tracker, transport) = start(&page);

    page.history().push_state("/checkout").unwrap();
    let pay = page.document().insert_element("beacon--click--pay");
    settle().await;

    page.document().dispatch(pay, "click");
    page.history().replace_state("/checkout?step=2").unwrap();
    settle().await;
    page.document().dispatch(pay, "click");

    transport.wait_for(5).await;
    let urls: Vec<_> = events(&transport).into_iter().map(|(_, _, url)| url).collect();
    assert_eq!(urls, vec!["/checkout", "/checkout?step=2"]);
}

#[tokio::test(start_paused = true)]
async fn custom_binding_prefix() {
    let settings = TrackerSettings {
        binding_prefix: "acme".to_string(),
        ..TrackerSettings::default()
    };
    let document = FakeDocument::new();
    let ours = document.insert_element("acme--click--logo");
    let theirs = document.insert_element("beacon--click--logo");
    let page = FakePage::builder().document(document).build();
    let transport = Arc::new(RecordingTransport::new());
    let _tracker =
        Tracker::start_with_transport(page.clone(), &settings, transport, Handle::current())
            .unwrap();

    assert_eq!(page.document().listener_count(ours), 1);
    assert_eq!(page.document().listener_count(theirs), 0);
}

// ── Mutation watcher ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn inserted_node_is_bound_when_observing() {
    let page = FakePage::builder().build();
    let (tracker, transport) = start(&page);
    assert!(tracker.active().unwrap().is_observing());

    let late = page.document().insert_element("beacon--submit--newsletter");
    assert!(page.document().flush_mutations() > 0);
    assert_eq!(page.document().dispatch(late, "submit"), 1);

    transport.wait_for(2).await;
    assert_eq!(
        events(&transport),
        vec![("submit".to_string(), "newsletter".to_string(), "/home".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn inserted_node_stays_unbound_without_observation() {
    let page = FakePage::builder().without_mutation_observer().build();
    let (tracker, transport) = start(&page);
    assert!(!tracker.active().unwrap().is_observing());

    let late = page.document().insert_element("beacon--submit--newsletter");
    assert_eq!(page.document().flush_mutations(), 0);
    assert_eq!(page.document().dispatch(late, "submit"), 0);

    settle().await;
    assert!(events(&transport).is_empty());
}

#[tokio::test(start_paused = true)]
async fn observation_can_be_disabled_by_attribute() {
    let page = FakePage::builder()
        .attribute("data-observe-mutations", "false")
        .build();
    let (tracker, _transport) = start(&page);

    assert!(!tracker.active().unwrap().is_observing());
    assert_eq!(page.document().connected_observers(), 0);
}

#[tokio::test(start_paused = true)]
async fn document_without_root_is_not_observed() {
    let page = FakePage::builder()
        .document(FakeDocument::without_root())
        .build();
    let (tracker, _transport) = start(&page);

    assert!(tracker.is_active());
    assert!(!tracker.active().unwrap().is_observing());
}

#[tokio::test(start_paused = true)]
async fn class_change_alone_does_not_bind() {
    let document = FakeDocument::new();
    let node = document.insert_element("btn");
    let page = FakePage::builder().document(document).build();
    let (_tracker, _transport) = start(&page);

    page.document().set_class(node, "btn beacon--click--promo");
    page.document().flush_mutations();

    assert_eq!(page.document().listener_count(node), 0);
}

// ── Listener symmetry ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn watcher_and_rescan_bind_a_node_once() {
    let page = FakePage::builder().build();
    let (_tracker, transport) = start(&page);

    page.history().push_state("/gallery").unwrap();
    let photo = page.document().insert_element("beacon--click--photo");
    page.document().flush_mutations();
    assert_eq!(page.document().listener_count(photo), 1);

    settle().await;
    assert_eq!(page.document().listener_count(photo), 1);

    page.document().dispatch(photo, "click");
    transport.wait_for(3).await;
    assert_eq!(events(&transport).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn node_readded_across_two_navigations_has_one_listener() {
    let document = FakeDocument::new();
    let menu = document.insert_element("beacon--click--menu");
    let page = FakePage::builder().document(document).build();
    let (tracker, transport) = start(&page);
    let doc = page.document();

    doc.detach(menu);
    page.history().push_state("/first").unwrap();
    doc.reattach(menu);
    doc.flush_mutations();
    settle().await;
    assert_eq!(doc.listener_count(menu), 1);

    doc.detach(menu);
    page.history().push_state("/second").unwrap();
    doc.reattach(menu);
    settle().await;
    doc.flush_mutations();
    assert_eq!(doc.listener_count(menu), 1);
    assert_eq!(tracker.active().unwrap().binder().bound_count(), 1);

    assert_eq!(doc.dispatch(menu, "click"), 1);
    transport.wait_for(4).await;
    assert_eq!(
        events(&transport),
        vec![("click".to_string(), "menu".to_string(), "/second".to_string())]
    );
}

// ── Re-entrant hosts ──────────────────────────────────────────────────────

/// Node tree whose first listener attach calls back into the binder and
/// detaches everything before the attach itself lands.
struct ReentrantTree {
    document: FakeDocument,
    binder: OnceLock<Weak<EventBinder>>,
    reentered: AtomicBool,
}

impl NodeTree for ReentrantTree {
    fn root(&self) -> Option<NodeId> {
        self.document.root()
    }

    fn query_class_fragment(&self, fragment: &str) -> Vec<NodeId> {
        self.document.query_class_fragment(fragment)
    }

    fn class_name(&self, node: NodeId) -> Option<String> {
        self.document.class_name(node)
    }

    fn add_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
        options: ListenerOptions,
    ) {
        if !self.reentered.swap(true, Ordering::SeqCst) {
            if let Some(binder) = self.binder.get().and_then(Weak::upgrade) {
                binder.remove_all();
            }
        }
        self.document
            .add_event_listener(node, event_type, listener, options);
    }

    fn remove_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: ListenerId,
        options: ListenerOptions,
    ) {
        self.document
            .remove_event_listener(node, event_type, listener, options);
    }
}

#[tokio::test(start_paused = true)]
async fn host_reentering_removal_during_attach_leaves_no_orphan() {
    let tree = Arc::new(ReentrantTree {
        document: FakeDocument::new(),
        binder: OnceLock::new(),
        reentered: AtomicBool::new(false),
    });
    let button = tree.document.insert_element("beacon--click--buy");

    let transport = Arc::new(RecordingTransport::new());
    let collector = Arc::new(CollectorClient::new(
        CollectorConfig {
            endpoint: "https://stats.example.com/api/collect".to_string(),
            website: "abc123".to_string(),
            hostname: "example.com".to_string(),
            screen: "1920x1080".to_string(),
            language: "en-US".to_string(),
            use_cache: false,
            storage_key: "beacon.cache".to_string(),
        },
        transport.clone(),
        Arc::new(MemoryStorage::new()),
        Handle::current(),
    ));
    let binder = Arc::new(EventBinder::new(
        tree.clone(),
        BindingGrammar::new("beacon").unwrap(),
        collector,
        SharedNavigation::new(NavigationState::new("/home", "")),
    ));
    tree.binder.set(Arc::downgrade(&binder)).unwrap();

    assert_eq!(binder.scan(), 0);
    assert_eq!(tree.document.listener_count(button), 0);
    assert_eq!(binder.bound_count(), 0);

    assert_eq!(binder.scan(), 1);
    assert_eq!(tree.document.listener_count(button), 1);
    assert_eq!(binder.bound_count(), 1);

    assert_eq!(tree.document.dispatch(button, "click"), 1);
    assert_eq!(transport.wait_for(1).await.len(), 1);
}

// ── Grammar properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn well_formed_tokens_parse_back(
        event_type in "[a-z]{1,12}",
        event_value in "[a-z0-9_][a-z0-9_-]{1,20}",
    ) {
        let grammar = BindingGrammar::new("beacon").unwrap();
        let token = grammar
            .parse_class_token(&format!("beacon--{event_type}--{event_value}"))
            .unwrap();
        prop_assert_eq!(token.event_type, event_type);
        prop_assert_eq!(token.event_value, event_value);
    }

    #[test]
    fn tokens_with_foreign_characters_never_parse(
        event_type in "[a-z]{1,8}",
        head in "[a-z0-9_]{1,8}",
        bad in "[A-Z.:/ @!]",
        tail in "[a-z0-9_-]{0,8}",
    ) {
        let grammar = BindingGrammar::new("beacon").unwrap();
        let token = format!("beacon--{event_type}--{head}{bad}{tail}");
        prop_assert!(grammar.parse_class_token(&token).is_none());
    }

    #[test]
    fn one_character_values_never_parse(event_type in "[a-z]{1,8}", value in "[a-z0-9_]") {
        let grammar = BindingGrammar::new("beacon").unwrap();
        let token = format!("beacon--{event_type}--{value}");
        prop_assert!(grammar.parse_class_token(&token).is_none());
    }
}
