//! The bridge channel: typed send with transport fallback, and inbound
//! dispatch to a single replaceable callback.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::events::{EventSurface, Listener, MessageData};
use crate::message::{Envelope, Message};
use crate::transport::{HostBridges, Transport, DEFAULT_WEBKIT_HANDLER};

mod inbound;
mod subscription;

pub use inbound::parse_inbound;
pub use subscription::{Subscription, SubscriptionState};

/// Callback invoked with every successfully parsed inbound envelope.
pub type MessageCallback = Arc<dyn Fn(&Envelope) + Send + Sync>;

/// Tunables for a channel.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    /// Name under `webkit.messageHandlers` to post to.
    pub webkit_handler: String,
    /// Log unsent messages at info level when no transport is present.
    pub log_fallback: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            webkit_handler: DEFAULT_WEBKIT_HANDLER.to_string(),
            log_fallback: true,
        }
    }
}

/// Best-effort messaging with the native host.
///
/// Cloning is cheap; clones share the host bridges and the callback slot.
#[derive(Clone)]
pub struct BridgeChannel {
    bridges: Arc<Mutex<HostBridges>>,
    callback: Arc<Mutex<Option<MessageCallback>>>,
    settings: Arc<BridgeSettings>,
}

impl BridgeChannel {
    pub fn new(bridges: HostBridges) -> Self {
        Self::with_settings(bridges, BridgeSettings::default())
    }

    pub fn with_settings(bridges: HostBridges, settings: BridgeSettings) -> Self {
        Self {
            bridges: Arc::new(Mutex::new(bridges)),
            callback: Arc::new(Mutex::new(None)),
            settings: Arc::new(settings),
        }
    }

    /// Replace the host globals, e.g. once a native shell has injected them.
    pub fn set_bridges(&self, bridges: HostBridges) {
        if let Ok(mut current) = self.bridges.lock() {
            *current = bridges;
        }
    }

    /// The transport the next send would use.
    pub fn transport(&self) -> Transport {
        match self.bridges.lock() {
            Ok(bridges) => Transport::probe(&bridges, &self.settings.webkit_handler),
            Err(_) => Transport::Absent,
        }
    }

    /// Stamp, serialize and post a message through the first available
    /// transport. Never fails: a missing host degrades to a log line and a
    /// transport error is logged and dropped.
    pub fn send(&self, message: Message) {
        let envelope = Envelope::new(message);
        let kind = envelope.kind();

        let json = match envelope.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(%kind, error = %e, "bridge message could not be serialized");
                return;
            }
        };

        let transport = self.transport();
        match transport.handle() {
            Some(handle) => {
                debug!(%kind, transport = %transport.kind(), "bridge message sent");
                if let Err(e) = handle.post_message(&json) {
                    warn!(%kind, transport = %transport.kind(), error = %e, "bridge delivery failed");
                }
            }
            None if self.settings.log_fallback => {
                info!(%kind, message = %json, "bridge message (dev mode, no native host)");
            }
            None => {
                debug!(%kind, "bridge message dropped, no native host");
            }
        }
    }

    /// Tell the host the page has mounted.
    pub fn notify_ready(&self) {
        self.send(Message::Ready);
    }

    pub fn notify_card_selected(&self, card_id: &str) {
        self.send(Message::card_selected(card_id));
    }

    pub fn notify_card_action(&self, card_id: &str, action: &str) {
        self.send(Message::card_action(card_id, action));
    }

    pub fn notify_error(&self, error: &str) {
        self.send(Message::error(error));
    }

    /// Ask the host for a data set, e.g. `"cards"`.
    pub fn request_data(&self, data_type: &str) {
        self.send(Message::data_request(data_type));
    }

    /// Register the inbound callback, replacing any previous one.
    /// Existing subscriptions pick it up without re-subscribing.
    pub fn on_message<F>(&self, callback: F)
    where
        F: Fn(&Envelope) + Send + Sync + 'static,
    {
        if let Ok(mut slot) = self.callback.lock() {
            *slot = Some(Arc::new(callback));
        }
    }

    pub fn clear_callback(&self) {
        if let Ok(mut slot) = self.callback.lock() {
            *slot = None;
        }
    }

    /// Attach one shared handler to every surface. Dropping or calling
    /// [`Subscription::unsubscribe`] removes exactly these registrations.
    pub fn listen(&self, surfaces: &[Arc<dyn EventSurface>]) -> Subscription {
        let channel = self.clone();
        let handler: Listener = Arc::new(move |data: &MessageData| channel.handle_inbound(data));

        let registrations = surfaces
            .iter()
            .map(|surface| {
                let id = surface.add_listener(Arc::clone(&handler));
                (Arc::clone(surface), id)
            })
            .collect();

        Subscription::new(registrations)
    }

    /// Parse one inbound event and hand it to the current callback.
    /// Malformed data is logged and dropped.
    pub fn handle_inbound(&self, data: &MessageData) {
        let envelope = match parse_inbound(data) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "inbound bridge message rejected");
                return;
            }
        };

        // Cloned out so the callback may re-register without deadlocking.
        let callback = self.callback.lock().ok().and_then(|slot| slot.clone());
        match callback {
            Some(callback) => {
                debug!(kind = %envelope.kind(), "inbound bridge message dispatched");
                callback(&envelope);
            }
            None => debug!(kind = %envelope.kind(), "inbound bridge message, no callback"),
        }
    }
}

#[cfg(test)]
mod tests;
