//! Tests for gating, the public entry point, token replay, and shutdown.

use std::sync::Arc;

use beacon_core::config::{InertReason, TrackerSettings};
use beacon_core::errors::{BeaconError, ErrorCode};
use beacon_core::models::DoNotTrackSignal;
use beacon_core::traits::{History, HistoryMethod};
use beacon_tracker::api::lookup;
use beacon_tracker::{EventOptions, Tracker, TrackerApi, ViewOptions};
use test_fixtures::{settle, FakeDocument, FakeGlobals, FakePage, RecordingTransport};
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

/// Drive a page through every kind of activity the tracker could react to.
async fn exercise(page: &FakePage) {
    let late = page.document().insert_element("beacon--click--late");
    page.document().flush_mutations();
    page.history().push_state("/next").unwrap();
    page.history().replace_state("/next?again=1").unwrap();
    settle().await;
    page.document().dispatch(late, "click");
    settle().await;
}

fn entry_point(page: &FakePage) -> Arc<TrackerApi> {
    let globals: &FakeGlobals = page.globals();
    lookup(globals, "beacon").unwrap()
}

fn tracked_document() -> FakeDocument {
    let document = FakeDocument::new();
    document.insert_element("beacon--click--signup");
    document
}

// ── Gating ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn do_not_track_makes_tracker_inert() {
    let page = FakePage::builder()
        .attribute("data-do-not-track", "true")
        .do_not_track(DoNotTrackSignal::enabled())
        .document(tracked_document())
        .build();
    let original = page.history().primitive(HistoryMethod::Push);
    let (tracker, transport) = start(&page);

    assert_eq!(tracker.inert_reason(), Some(InertReason::DoNotTrack));
    exercise(&page).await;

    assert_eq!(transport.count(), 0);
    assert_eq!(page.document().total_listeners(), 0);
    assert_eq!(page.document().connected_observers(), 0);
    assert!(Arc::ptr_eq(&original, &page.history().primitive(HistoryMethod::Push)));
    assert!(page.globals().is_empty());
    assert_eq!(page.storage().reads(), 0);
}

#[tokio::test(start_paused = true)]
async fn do_not_track_attribute_without_signal_tracks() {
    let page = FakePage::builder()
        .attribute("data-do-not-track", "true")
        .build();
    let (tracker, transport) = start(&page);

    assert!(tracker.is_active());
    assert!(tracker.active().unwrap().config().do_not_track);
    assert_eq!(transport.wait_for(1).await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn excluded_domain_makes_tracker_inert() {
    let page = FakePage::builder()
        .hostname("staging.example.com")
        .attribute("data-domains", "example.com, www.example.com")
        .document(tracked_document())
        .build();
    let (tracker, transport) = start(&page);

    assert_eq!(tracker.inert_reason(), Some(InertReason::DomainNotAllowed));
    exercise(&page).await;
    assert_eq!(transport.count(), 0);
    assert_eq!(page.document().total_listeners(), 0);
}

#[tokio::test(start_paused = true)]
async fn allowed_domain_tracks() {
    let page = FakePage::builder()
        .hostname("www.example.com")
        .attribute("data-domains", "example.com,www.example.com")
        .build();
    let (tracker, transport) = start(&page);

    assert!(tracker.is_active());
    assert_eq!(transport.wait_for(1).await[0].field("hostname"), Some("www.example.com"));
}

#[tokio::test(start_paused = true)]
async fn missing_embedding_makes_tracker_inert() {
    let page = FakePage::builder().without_embedding().build();
    let (tracker, transport) = start(&page);

    assert_eq!(tracker.inert_reason(), Some(InertReason::MissingEmbedding));
    exercise(&page).await;
    assert_eq!(transport.count(), 0);
    assert!(page.globals().is_empty());
}

#[tokio::test]
async fn http_start_on_inert_page_needs_no_client() {
    let page = FakePage::builder().without_embedding().build();
    let tracker = Tracker::start(page.clone(), &TrackerSettings::default(), Handle::current())
        .unwrap();
    assert!(!tracker.is_active());
    tracker.shutdown();
}

#[tokio::test]
async fn invalid_settings_are_rejected() {
    let page = FakePage::builder().build();
    let settings = TrackerSettings {
        binding_prefix: "Not Valid".to_string(),
        ..TrackerSettings::default()
    };
    let transport = Arc::new(RecordingTransport::new());

    let err =
        Tracker::start_with_transport(page.clone(), &settings, transport.clone(), Handle::current())
            .unwrap_err();

    assert!(matches!(err, BeaconError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert_eq!(transport.count(), 0);
}

// ── Endpoint ──────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn host_url_overrides_endpoint_root() {
    let page = FakePage::builder()
        .attribute("data-host-url", "https://collect.example.net/")
        .build();
    let (_tracker, transport) = start(&page);

    let requests = transport.wait_for(1).await;
    assert_eq!(requests[0].endpoint, "https://collect.example.net/api/collect");
}

// ── Public entry point ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn entry_point_is_installed_once() {
    let globals = Arc::new(FakeGlobals::new());
    let first_page = FakePage::builder().globals(globals.clone()).build();
    let second_page = FakePage::builder()
        .globals(globals.clone())
        .attribute("data-website-id", "second")
        .build();

    let (first, _) = start(&first_page);
    let (second, _) = start(&second_page);

    assert_eq!(globals.len(), 1);
    assert!(first.active().unwrap().owns_entry_point());
    assert!(!second.active().unwrap().owns_entry_point());

    let installed = lookup(&*globals, "beacon").unwrap();
    assert!(Arc::ptr_eq(&installed, first.active().unwrap().api()));
}

#[tokio::test(start_paused = true)]
async fn entry_point_shorthand_and_defaults() {
    let page = FakePage::builder()
        .path("/docs", "?v=2")
        .referrer("https://search.example/")
        .build();
    let (_tracker, transport) = start(&page);
    let api = entry_point(&page);

    api.track("download");
    api.track_view(ViewOptions::default());
    api.track_event(EventOptions {
        event_value: Some("plan-pro".to_string()),
        event_type: Some("purchase".to_string()),
        url: Some("/checkout".to_string()),
        website: Some("other".to_string()),
    });
    api.track_view(ViewOptions {
        url: Some("/virtual".to_string()),
        referrer: Some("/docs".to_string()),
        website: None,
    });
    api.track_event(EventOptions::default());

    let requests = transport.wait_for(6).await;
    let shorthand = &requests[1];
    assert_eq!(shorthand.beacon_type(), "event");
    assert_eq!(shorthand.field("event_type"), Some("custom"));
    assert_eq!(shorthand.field("event_value"), Some("download"));
    assert_eq!(shorthand.field("url"), Some("/docs?v=2"));

    let view = &requests[2];
    assert_eq!(view.field("url"), Some("/docs?v=2"));
    assert_eq!(view.field("referrer"), Some("https://search.example/"));
    assert_eq!(view.field("website"), Some("abc123"));

    let explicit = &requests[3];
    assert_eq!(explicit.field("event_type"), Some("purchase"));
    assert_eq!(explicit.field("url"), Some("/checkout"));
    assert_eq!(explicit.field("website"), Some("other"));

    assert_eq!(requests[4].field("url"), Some("/virtual"));
    assert_eq!(requests[4].field("referrer"), Some("/docs"));

    let bare = &requests[5];
    assert_eq!(bare.field("event_type"), Some("custom"));
    assert!(bare.payload().get("event_value").is_none());
}

#[tokio::test(start_paused = true)]
async fn entry_point_follows_navigation_state() {
    let page = FakePage::builder().build();
    let (_tracker, transport) = start(&page);
    let api = entry_point(&page);

    page.history().push_state("/after").unwrap();
    api.track_view(ViewOptions::default());

    let requests = transport.wait_for(3).await;
    assert_eq!(requests[2].field("url"), Some("/after"));
    assert_eq!(requests[2].field("referrer"), Some("/home"));
}

#[tokio::test(start_paused = true)]
async fn entry_point_works_without_auto_track() {
    let page = FakePage::builder()
        .attribute("data-auto-track", "false")
        .build();
    let (_tracker, transport) = start(&page);
    let api = entry_point(&page);

    api.track("manual");

    let requests = transport.wait_for(1).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].field("event_value"), Some("manual"));
}

// ── Token replay ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn cached_token_is_replayed() {
    let page = FakePage::builder().attribute("data-cache", "true").build();
    let (_tracker, transport) = start(&page);

    transport.wait_for(1).await;
    page.history().push_state("/second").unwrap();
    transport.wait_for(2).await;
    page.history().push_state("/third").unwrap();

    let requests = transport.wait_for(3).await;
    assert!(requests[0].payload()["cache"].is_null());
    assert_eq!(requests[1].field("cache"), Some("token-1"));
    assert_eq!(requests[2].field("cache"), Some("token-2"));
    assert_eq!(page.storage().get("beacon.cache").as_deref(), Some("token-3"));
}

#[tokio::test(start_paused = true)]
async fn cache_disabled_by_default() {
    let page = FakePage::builder().build();
    let (_tracker, transport) = start(&page);

    transport.wait_for(1).await;
    page.history().push_state("/second").unwrap();
    let requests = transport.wait_for(2).await;

    assert!(requests.iter().all(|r| r.payload()["cache"].is_null()));
    assert_eq!(page.storage().reads(), 0);
    assert_eq!(page.storage().writes(), 0);
}

// ── Shutdown ──────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn shutdown_stops_automatic_tracking() {
    let page = FakePage::builder().document(tracked_document()).build();
    let (tracker, transport) = start(&page);
    transport.wait_for(1).await;
    assert_eq!(page.document().total_listeners(), 1);

    tracker.shutdown();
    let active = tracker.active().unwrap();
    assert!(!active.is_observing());
    assert!(!active.is_tracking_navigation());
    assert_eq!(page.document().total_listeners(), 0);
    assert_eq!(page.document().connected_observers(), 0);

    exercise(&page).await;
    assert_eq!(transport.count(), 1);
    assert_eq!(page.document().total_listeners(), 0);
    assert_eq!(page.history().entries().len(), 2);

    entry_point(&page).track("still-here");
    assert_eq!(transport.wait_for(2).await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_rescan() {
    let page = FakePage::builder().without_mutation_observer().build();
    let (tracker, _transport) = start(&page);

    page.history().push_state("/soon").unwrap();
    let node = page.document().insert_element("beacon--click--soon");
    tracker.shutdown();
    settle().await;

    assert_eq!(page.document().listener_count(node), 0);
}
