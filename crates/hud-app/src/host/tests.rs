//! End-to-end host behavior: routing, handshake, relay, and retry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hud_bus::{Message, RETRY_DELAY};
use hud_common::{PartyId, PointerKind, Rect, SurfaceId};
use hud_config::HudConfig;
use hud_router::{
    FeatureRegistry, FeatureSource, LayoutElement, LayoutSurface, LookupError, LookupService, Recipient,
    PASS_THROUGH_CLASS,
};

use super::*;

const HOST: &str = "http://localhost:9000";

fn surfaces() -> Vec<LayoutSurface> {
    vec![
        LayoutSurface::new("s0").with_elements(vec![
            LayoutElement::new("toolbar", Rect::new(0.0, 0.0, 100.0, 20.0)),
            LayoutElement::new("gap", Rect::new(0.0, 20.0, 100.0, 80.0)).with_class(PASS_THROUGH_CLASS),
        ]),
        LayoutSurface::new("s1").with_elements(vec![LayoutElement::new(
            "graph",
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )]),
    ]
}

fn hud() -> Hud {
    let mut hud = Hud::new(
        &HudConfig::default(),
        surfaces(),
        Arc::new(FeatureRegistry::new(HOST)),
    );
    hud.drain_outputs();
    hud
}

fn loaded(hud: &mut Hud, ids: &[&str]) {
    for id in ids {
        hud.apply(
            HostInput::Loaded {
                surface: SurfaceId::from(*id),
            },
            Instant::now(),
        );
    }
    hud.drain_outputs();
}

fn click(x: f64, y: f64) -> HostInput {
    HostInput::Pointer {
        kind: PointerKind::Click,
        x,
        y,
        payload: serde_json::Value::Null,
    }
}

fn send(surface: &str, message: Message) -> HostInput {
    HostInput::Send {
        surface: SurfaceId::from(surface),
        message,
    }
}

fn deliveries(outputs: &[HostOutput]) -> Vec<(String, Message)> {
    outputs
        .iter()
        .filter_map(|o| match o {
            HostOutput::Deliver { surface, message } => Some((surface.to_string(), message.clone())),
            _ => None,
        })
        .collect()
}

// -- Startup --

#[tokio::test]
async fn start_resolves_sources_in_order_and_skips_bad_ones() {
    let mut config = HudConfig::default();
    config.surfaces.sources = vec![
        "http://0.0.0.0:9011".into(),
        "ftp://0.0.0.0:9012".into(),
        "http://0.0.0.0:9010".into(),
    ];
    let registry = Arc::new(FeatureRegistry::new(HOST));

    let mut hud = Hud::start(&config, registry.clone()).await;

    let ids = hud.router().stack().ids();
    assert_eq!(ids, vec![SurfaceId::from("surface-0"), SurfaceId::from("surface-2")]);
    assert_eq!(registry.len(), 2);

    match &hud.drain_outputs()[..] {
        [HostOutput::Ready { surfaces }] => {
            assert_eq!(surfaces.len(), 2);
            assert!(surfaces[0].src.starts_with("http://localhost:9000/api/routing/"));
            assert_eq!(surfaces[0].text.as_deref(), Some("use src"));
        }
        other => panic!("unexpected outputs {other:?}"),
    }
}

// -- Routing --

#[tokio::test]
async fn click_before_load_goes_to_backplane() {
    let mut hud = hud();
    hud.apply(click(10.0, 10.0), Instant::now());

    assert_eq!(
        hud.drain_outputs(),
        vec![HostOutput::Routed {
            kind: PointerKind::Click,
            recipient: Recipient::Backplane,
        }]
    );
}

#[tokio::test]
async fn click_routes_to_front_surface_and_dispatches() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(click(10.0, 10.0), Instant::now());
    let outputs = hud.drain_outputs();

    assert_eq!(outputs.len(), 2);
    assert!(matches!(
        &outputs[0],
        HostOutput::Routed { recipient: Recipient::Surface { surface, .. }, .. } if surface.as_str() == "s0"
    ));
    match &outputs[1] {
        HostOutput::Dispatch(d) => {
            assert_eq!(d.surface.as_str(), "s0");
            assert_eq!(d.element.id, "toolbar");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(hud.router().is_accepting(&SurfaceId::from("s0")));
}

#[tokio::test]
async fn pass_through_zone_falls_to_surface_behind() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(click(50.0, 50.0), Instant::now());

    assert!(matches!(
        &hud.drain_outputs()[0],
        HostOutput::Routed { recipient: Recipient::Surface { surface, .. }, .. } if surface.as_str() == "s1"
    ));
    assert!(!hud.router().is_accepting(&SurfaceId::from("s0")));
}

#[tokio::test]
async fn failed_front_surface_is_skipped() {
    let mut hud = hud();
    loaded(&mut hud, &["s1"]);
    hud.apply(
        HostInput::Failed {
            surface: SurfaceId::from("s0"),
        },
        Instant::now(),
    );

    hud.apply(click(10.0, 10.0), Instant::now());

    assert!(matches!(
        &hud.drain_outputs()[0],
        HostOutput::Routed { recipient: Recipient::Surface { surface, .. }, .. } if surface.as_str() == "s1"
    ));
}

#[tokio::test]
async fn layout_update_changes_hit_test() {
    let mut hud = hud();
    loaded(&mut hud, &["s0"]);
    hud.apply(
        HostInput::Layout {
            surface: SurfaceId::from("s0"),
            bounds: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            elements: vec![LayoutElement::new("dot", Rect::new(0.0, 0.0, 10.0, 10.0))],
        },
        Instant::now(),
    );

    hud.apply(click(50.0, 50.0), Instant::now());
    assert_eq!(
        hud.drain_outputs(),
        vec![HostOutput::Routed {
            kind: PointerKind::Click,
            recipient: Recipient::Backplane,
        }]
    );
}

#[tokio::test]
async fn yield_from_root_reroutes() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(
        HostInput::Yield {
            surface: SurfaceId::from("s0"),
            target: hud_router::HitTarget::Root,
            kind: PointerKind::Click,
            x: 50.0,
            y: 50.0,
            payload: serde_json::Value::Null,
        },
        Instant::now(),
    );

    assert!(matches!(
        &hud.drain_outputs()[0],
        HostOutput::Routed { recipient: Recipient::Surface { surface, .. }, .. } if surface.as_str() == "s1"
    ));
}

// -- Handshake and relay --

#[tokio::test]
async fn load_opens_one_channel_per_surface() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s0", "s1"]);

    assert_eq!(
        hud.bus().connected_parties(),
        vec![PartyId::from("s0"), PartyId::from("s1")]
    );
}

#[tokio::test]
async fn broadcast_reaches_everyone_but_sender() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    let msg = Message::with_info("broadcast").with("word", "木");
    hud.apply(send("s0", msg.clone()), Instant::now());

    assert_eq!(deliveries(&hud.drain_outputs()), vec![("s1".to_string(), msg)]);
}

#[tokio::test]
async fn new_feature_is_announced_to_every_surface() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    let request = Message::with_info("new feature").with("url", "http://0.0.0.0:9012");
    hud.apply(send("s0", request), Instant::now());
    assert!(deliveries(&hud.drain_outputs()).is_empty());
    assert_eq!(hud.lookups_in_flight(), 1);

    let done = hud.next_lookup().await.unwrap();
    hud.finish_lookup(done);
    assert_eq!(hud.lookups_in_flight(), 0);

    let got = deliveries(&hud.drain_outputs());
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].0, "s0");
    assert_eq!(got[1].0, "s1");
    for (_, message) in &got {
        assert_eq!(message.info(), Some("created feature"));
        assert!(message
            .get_str("src")
            .is_some_and(|s| s.starts_with("http://localhost:9000/api/routing/")));
        assert_eq!(message.get_str("srcdoc"), Some("use src"));
    }
}

#[tokio::test]
async fn failed_feature_lookup_announces_nothing() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(
        send("s0", Message::with_info("new feature").with("url", "not a url")),
        Instant::now(),
    );
    hud.apply(send("s0", Message::with_info("new feature")), Instant::now());
    assert_eq!(hud.lookups_in_flight(), 1);

    let done = hud.next_lookup().await.unwrap();
    hud.finish_lookup(done);

    assert!(deliveries(&hud.drain_outputs()).is_empty());
    assert_eq!(hud.lookups_in_flight(), 0);
}

struct SlowLookup(Duration);

#[async_trait::async_trait]
impl LookupService for SlowLookup {
    async fn resolve(&self, location: &str) -> Result<FeatureSource, LookupError> {
        tokio::time::sleep(self.0).await;
        Ok(FeatureSource {
            src: format!("{location}/ready/"),
            text: None,
        })
    }
}

#[tokio::test]
async fn slow_feature_lookup_does_not_hold_up_retries() {
    let mut hud = Hud::new(
        &HudConfig::default(),
        surfaces(),
        Arc::new(SlowLookup(Duration::from_millis(300))),
    );
    hud.drain_outputs();
    loaded(&mut hud, &["s1"]);
    let t0 = Instant::now();

    let request = Message::with_info("new feature").with("url", "http://0.0.0.0:9012");
    hud.apply(send("s1", request), t0);
    let msg = Message::with_info("broadcast").with("n", 1);
    hud.apply(send("s0", msg.clone()), t0);
    assert!(t0.elapsed() < Duration::from_millis(250));
    assert_eq!(hud.lookups_in_flight(), 1);

    // The retry lands while the lookup is still sleeping.
    loaded(&mut hud, &["s0"]);
    hud.fire_retries(t0 + RETRY_DELAY);
    assert_eq!(deliveries(&hud.drain_outputs()), vec![("s1".to_string(), msg)]);
    assert_eq!(hud.lookups_in_flight(), 1);

    let done = hud.next_lookup().await.unwrap();
    hud.finish_lookup(done);
    let got = deliveries(&hud.drain_outputs());
    assert_eq!(got.len(), 2);
    for (_, message) in &got {
        assert_eq!(message.info(), Some("created feature"));
        assert_eq!(message.get_str("src"), Some("http://0.0.0.0:9012/ready/"));
        assert_eq!(message.get_str("srcdoc"), None);
    }
}

#[tokio::test]
async fn unknown_and_missing_info_are_not_relayed() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(send("s0", Message::with_info("hello")), Instant::now());
    hud.apply(send("s0", Message::new().with("x", 1)), Instant::now());

    assert!(deliveries(&hud.drain_outputs()).is_empty());
}

#[tokio::test]
async fn raw_message_from_host_origin_is_relayed() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(
        HostInput::Message {
            surface: SurfaceId::from("s1"),
            origin: HOST.into(),
            message: Message::with_info("broadcast"),
        },
        Instant::now(),
    );

    let got = deliveries(&hud.drain_outputs());
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].0, "s0");
}

#[tokio::test]
async fn raw_message_from_foreign_origin_is_dropped() {
    let mut hud = hud();
    loaded(&mut hud, &["s0", "s1"]);

    hud.apply(
        HostInput::Message {
            surface: SurfaceId::from("s1"),
            origin: "https://evil.example".into(),
            message: Message::with_info("broadcast"),
        },
        Instant::now(),
    );

    assert!(hud.drain_outputs().is_empty());
}

// -- Retry --

#[tokio::test]
async fn send_before_load_is_retried_once() {
    let mut hud = hud();
    loaded(&mut hud, &["s1"]);
    let t0 = Instant::now();

    let msg = Message::with_info("broadcast").with("n", 1);
    hud.apply(send("s0", msg.clone()), t0);
    assert!(deliveries(&hud.drain_outputs()).is_empty());
    assert_eq!(hud.next_retry_at(), Some(t0 + RETRY_DELAY));

    loaded(&mut hud, &["s0"]);
    hud.fire_retries(t0 + RETRY_DELAY);

    assert_eq!(deliveries(&hud.drain_outputs()), vec![("s1".to_string(), msg)]);
    assert_eq!(hud.next_retry_at(), None);
}

#[tokio::test]
async fn send_that_never_finds_a_channel_is_abandoned() {
    let mut hud = hud();
    let t0 = Instant::now();

    hud.apply(send("s0", Message::with_info("broadcast")), t0);
    hud.fire_retries(t0 + Duration::from_millis(499));
    assert!(hud.next_retry_at().is_some());

    hud.fire_retries(t0 + RETRY_DELAY);
    assert_eq!(hud.next_retry_at(), None);
    assert!(hud.drain_outputs().is_empty());
}

// -- Boundary --

#[tokio::test]
async fn malformed_lines_produce_nothing() {
    let mut hud = hud();
    hud.handle_line("garbage", Instant::now());
    hud.handle_line(r#"{"type":"pointer","kind":"wheel","x":0,"y":0}"#, Instant::now());
    assert!(hud.drain_outputs().is_empty());
}

#[tokio::test]
async fn lines_drive_the_host() {
    let mut hud = hud();
    hud.handle_line(r#"{"type":"loaded","surface":"s0"}"#, Instant::now());
    hud.handle_line(r#"{"type":"pointer","kind":"click","x":5,"y":5}"#, Instant::now());

    let outputs = hud.drain_outputs();
    assert!(matches!(
        &outputs[0],
        HostOutput::Routed { recipient: Recipient::Surface { surface, .. }, .. } if surface.as_str() == "s0"
    ));
    assert!(matches!(&outputs[1], HostOutput::Dispatch(_)));
}

#[tokio::test]
async fn unsubscribed_kind_is_not_routed() {
    let mut hud = hud();
    loaded(&mut hud, &["s0"]);
    hud.apply(
        HostInput::Pointer {
            kind: PointerKind::MouseOver,
            x: 5.0,
            y: 5.0,
            payload: serde_json::Value::Null,
        },
        Instant::now(),
    );
    assert!(hud.drain_outputs().is_empty());
}
