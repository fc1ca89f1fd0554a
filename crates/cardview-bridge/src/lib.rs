//! Messaging bridge between the card page and the native shell hosting it.
//!
//! Provides:
//! - Typed `{type, payload, timestamp}` envelopes with per-type payloads
//! - Prioritized transport probing (React Native, WebKit, Android, none)
//! - Inbound listening on the window and document message surfaces
//! - A single-slot callback that can be replaced without re-subscribing

pub mod channel;
pub mod events;
pub mod message;
pub mod transport;

pub use channel::{
    parse_inbound, BridgeChannel, BridgeSettings, MessageCallback, Subscription, SubscriptionState,
};
pub use events::{EventSurface, HostEventTarget, Listener, ListenerId, MessageData};
pub use message::{
    CardActionPayload, CardSelectedPayload, DataRequestPayload, DataResponsePayload, Envelope,
    ErrorPayload, Message, MessageType, NavigationPayload,
};
pub use transport::{
    HostBridges, HostHandle, Transport, TransportKind, WebkitNamespace, DEFAULT_WEBKIT_HANDLER,
};
