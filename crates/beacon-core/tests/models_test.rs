//! Wire-shape tests for beacons and navigation state.

use beacon_core::models::{
    Beacon, BeaconType, EventPayload, NavigationState, PageContext, PageMetadata,
    PageviewPayload, ScreenSize,
};
use serde_json::json;

fn meta(cache: Option<&str>) -> PageMetadata {
    PageMetadata {
        website: "abc123".to_string(),
        hostname: "example.com".to_string(),
        screen: "1920x1080".to_string(),
        language: "en-US".to_string(),
        cache: cache.map(str::to_string),
    }
}

// ── Wire shape ─────────────────────────────────────────────────────────────

#[test]
fn pageview_serializes_as_tagged_envelope() {
    let beacon = Beacon::Pageview(PageviewPayload {
        url: "/home".to_string(),
        referrer: "https://example.com/".to_string(),
        meta: meta(None),
    });

    let value = serde_json::to_value(&beacon).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "pageview",
            "payload": {
                "url": "/home",
                "referrer": "https://example.com/",
                "website": "abc123",
                "hostname": "example.com",
                "screen": "1920x1080",
                "language": "en-US",
                "cache": null
            }
        })
    );
    assert_eq!(beacon.beacon_type(), BeaconType::Pageview);
    assert_eq!(beacon.beacon_type().as_str(), "pageview");
}

#[test]
fn event_omits_missing_value_and_carries_token() {
    let beacon = Beacon::Event(EventPayload {
        event_type: "custom".to_string(),
        event_value: None,
        url: "/about".to_string(),
        meta: meta(Some("tok-1")),
    });

    let value = serde_json::to_value(&beacon).unwrap();
    assert_eq!(value["type"], "event");
    assert!(value["payload"].get("event_value").is_none());
    assert_eq!(value["payload"]["cache"], "tok-1");
    assert_eq!(beacon.url(), "/about");
    assert_eq!(beacon.meta().cache.as_deref(), Some("tok-1"));
}

// ── Navigation and page ────────────────────────────────────────────────────

#[test]
fn navigation_advance_moves_url_into_referrer() {
    let mut state = NavigationState::new("/home", "https://example.com/");
    state.advance("/about?ref=1");
    assert_eq!(state, NavigationState::new("/about?ref=1", "/home"));
    state.advance("/contact");
    assert_eq!(state.referrer, "/about?ref=1");
}

#[test]
fn page_context_formats_url_and_screen() {
    let page = PageContext {
        hostname: "example.com".to_string(),
        pathname: "/home".to_string(),
        search: "?q=1".to_string(),
        referrer: String::new(),
        screen: ScreenSize {
            width: 1280,
            height: 720,
        },
        language: "de".to_string(),
    };
    assert_eq!(page.initial_url(), "/home?q=1");
    assert_eq!(page.screen.to_string(), "1280x720");
}
