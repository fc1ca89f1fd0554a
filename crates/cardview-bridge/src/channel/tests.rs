//! Tests for sending, transport fallback and inbound dispatch.

use super::*;
use crate::events::HostEventTarget;
use crate::message::MessageType;
use crate::transport::{TransportKind, WebkitNamespace};
use crate::HostHandle;
use cardview_common::BridgeError;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct RecordingHandle {
    posted: Mutex<Vec<String>>,
}

impl RecordingHandle {
    fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

impl HostHandle for RecordingHandle {
    fn post_message(&self, message: &str) -> Result<(), BridgeError> {
        self.posted.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

struct FailingHandle;

impl HostHandle for FailingHandle {
    fn post_message(&self, _message: &str) -> Result<(), BridgeError> {
        Err(BridgeError::Transport("host detached".into()))
    }
}

fn surfaces() -> (Arc<HostEventTarget>, Arc<HostEventTarget>, Vec<Arc<dyn EventSurface>>) {
    let window = Arc::new(HostEventTarget::window());
    let document = Arc::new(HostEventTarget::document());
    let list: Vec<Arc<dyn EventSurface>> = vec![window.clone(), document.clone()];
    (window, document, list)
}

fn counter_callback(channel: &BridgeChannel) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    channel.on_message(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    hits
}

// -- Sending --

#[test]
fn send_without_host_does_not_panic() {
    let channel = BridgeChannel::new(HostBridges::none());
    assert_eq!(channel.transport().kind(), TransportKind::None);
    channel.notify_ready();
    channel.notify_card_selected("card-001");
    channel.notify_card_action("card-001", "block");
    channel.notify_error("boom");
    channel.request_data("cards");
}

#[test]
fn send_with_empty_webkit_namespace_falls_back() {
    let bridges = HostBridges {
        react_native: None,
        webkit: Some(WebkitNamespace {
            message_handlers: None,
        }),
        android: None,
    };
    let channel = BridgeChannel::new(bridges);
    assert_eq!(channel.transport().kind(), TransportKind::None);
    channel.notify_ready();
}

#[test]
fn react_native_preferred_over_android() {
    let rn = Arc::new(RecordingHandle::default());
    let android = Arc::new(RecordingHandle::default());
    let channel = BridgeChannel::new(HostBridges {
        react_native: Some(rn.clone()),
        webkit: None,
        android: Some(android.clone()),
    });

    channel.notify_card_selected("card-002");

    assert_eq!(rn.posted().len(), 1);
    assert!(android.posted().is_empty());
}

#[test]
fn webkit_used_when_react_native_absent() {
    let webkit = Arc::new(RecordingHandle::default());
    let android = Arc::new(RecordingHandle::default());
    let channel = BridgeChannel::new(HostBridges {
        react_native: None,
        webkit: Some(WebkitNamespace::with_handler("nativeBridge", webkit.clone())),
        android: Some(android.clone()),
    });

    channel.notify_ready();

    assert_eq!(webkit.posted().len(), 1);
    assert!(android.posted().is_empty());
}

#[test]
fn custom_webkit_handler_name() {
    let webkit = Arc::new(RecordingHandle::default());
    let settings = BridgeSettings {
        webkit_handler: "cardsBridge".into(),
        log_fallback: false,
    };
    let channel =
        BridgeChannel::with_settings(HostBridges::webkit("cardsBridge", webkit.clone()), settings);
    channel.notify_ready();
    assert_eq!(webkit.posted().len(), 1);
}

#[test]
fn posted_text_is_a_full_envelope() {
    let rn = Arc::new(RecordingHandle::default());
    let channel = BridgeChannel::new(HostBridges::react_native(rn.clone()));

    channel.notify_card_action("card-003", "change-limit");

    let posted = rn.posted();
    let value: serde_json::Value = serde_json::from_str(&posted[0]).unwrap();
    assert_eq!(value["type"], "CARD_ACTION");
    assert_eq!(value["payload"]["cardId"], "card-003");
    assert_eq!(value["payload"]["action"], "change-limit");
    assert!(value["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn timestamps_do_not_go_backwards() {
    let rn = Arc::new(RecordingHandle::default());
    let channel = BridgeChannel::new(HostBridges::react_native(rn.clone()));
    channel.notify_ready();
    channel.request_data("cards");

    let stamps: Vec<i64> = rn
        .posted()
        .iter()
        .map(|p| Envelope::from_json(p).unwrap().timestamp)
        .collect();
    assert!(stamps[0] <= stamps[1]);
}

#[test]
fn delivery_failure_is_swallowed() {
    let channel = BridgeChannel::new(HostBridges::android(Arc::new(FailingHandle)));
    channel.notify_error("still fine");
    assert_eq!(channel.transport().kind(), TransportKind::Android);
}

#[test]
fn bridges_can_appear_after_construction() {
    let channel = BridgeChannel::new(HostBridges::none());
    channel.notify_ready();

    let rn = Arc::new(RecordingHandle::default());
    channel.set_bridges(HostBridges::react_native(rn.clone()));
    channel.notify_ready();

    assert_eq!(rn.posted().len(), 1);
}

// -- Receiving --

#[test]
fn inbound_text_reaches_callback() {
    let channel = BridgeChannel::new(HostBridges::none());
    let received = Arc::new(Mutex::new(Vec::new()));
    let r = Arc::clone(&received);
    channel.on_message(move |env| r.lock().unwrap().push(env.kind()));

    let (window, _document, list) = surfaces();
    let _sub = channel.listen(&list);

    window.dispatch(r#"{"type":"READY","payload":{},"timestamp":1}"#);
    assert_eq!(*received.lock().unwrap(), vec![MessageType::Ready]);
}

#[test]
fn inbound_on_document_surface_is_heard() {
    let channel = BridgeChannel::new(HostBridges::none());
    let hits = counter_callback(&channel);
    let (_window, document, list) = surfaces();
    let _sub = channel.listen(&list);

    document.dispatch(r#"{"type":"ERROR","payload":{"error":"x"},"timestamp":1}"#);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn inbound_structured_data_is_used_as_is() {
    let channel = BridgeChannel::new(HostBridges::none());
    let hits = counter_callback(&channel);
    let (window, _document, list) = surfaces();
    let _sub = channel.listen(&list);

    window.dispatch(serde_json::json!({
        "type": "DATA_RESPONSE",
        "payload": {},
        "timestamp": 7
    }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn non_json_text_never_reaches_callback() {
    let channel = BridgeChannel::new(HostBridges::none());
    let hits = counter_callback(&channel);
    let (window, document, list) = surfaces();
    let _sub = channel.listen(&list);

    window.dispatch("not json at all");
    document.dispatch("{\"type\":");
    window.dispatch(serde_json::json!({"hello": "world"}));
    window.dispatch(r#"{"type":"CARD_SELECTED","payload":{}}"#);

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn replaced_callback_is_the_only_one_invoked() {
    let channel = BridgeChannel::new(HostBridges::none());
    let (window, _document, list) = surfaces();
    let _sub = channel.listen(&list);

    let a = counter_callback(&channel);
    let b = counter_callback(&channel);

    window.dispatch(r#"{"type":"READY"}"#);

    assert_eq!(a.load(Ordering::SeqCst), 0);
    assert_eq!(b.load(Ordering::SeqCst), 1);
    assert_eq!(window.listener_count(), 1);
}

#[test]
fn cleared_callback_receives_nothing() {
    let channel = BridgeChannel::new(HostBridges::none());
    let hits = counter_callback(&channel);
    channel.clear_callback();
    channel.handle_inbound(&MessageData::Text(r#"{"type":"READY"}"#.into()));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn callback_may_reregister_while_running() {
    let channel = BridgeChannel::new(HostBridges::none());
    let inner = channel.clone();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    channel.on_message(move |_| {
        let h = Arc::clone(&h);
        inner.on_message(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
    });

    channel.handle_inbound(&MessageData::from(r#"{"type":"READY"}"#));
    channel.handle_inbound(&MessageData::from(r#"{"type":"READY"}"#));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// -- Subscription lifecycle --

#[test]
fn listen_adds_one_listener_per_surface() {
    let channel = BridgeChannel::new(HostBridges::none());
    let (window, document, list) = surfaces();
    let sub = channel.listen(&list);

    assert_eq!(sub.state(), SubscriptionState::Subscribed);
    assert_eq!(sub.surface_count(), 2);
    assert_eq!(window.listener_count(), 1);
    assert_eq!(document.listener_count(), 1);
}

#[test]
fn unsubscribe_removes_exactly_its_listeners() {
    let channel = BridgeChannel::new(HostBridges::none());
    let (window, document, list) = surfaces();

    let foreign_hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::clone(&foreign_hits);
    window.add_listener(Arc::new(move |_: &MessageData| {
        f.fetch_add(1, Ordering::SeqCst);
    }));

    let mut sub = channel.listen(&list);
    sub.unsubscribe();
    sub.unsubscribe();

    assert_eq!(sub.state(), SubscriptionState::Unsubscribed);
    assert_eq!(window.listener_count(), 1);
    assert_eq!(document.listener_count(), 0);

    window.dispatch(r#"{"type":"READY"}"#);
    assert_eq!(foreign_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_subscription_detaches() {
    let channel = BridgeChannel::new(HostBridges::none());
    let hits = counter_callback(&channel);
    let (window, document, list) = surfaces();
    {
        let _sub = channel.listen(&list);
    }
    assert_eq!(window.listener_count(), 0);
    assert_eq!(document.listener_count(), 0);

    window.dispatch(r#"{"type":"READY"}"#);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
