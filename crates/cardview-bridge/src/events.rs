//! Inbound event surfaces.
//!
//! Native WebViews deliver host messages on different targets: some fire a
//! `message` event on `window`, others on `document`. Each target is an
//! [`EventSurface`] the channel attaches one shared listener to.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Data carried by a host message event.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageData {
    /// Serialized JSON, as most hosts send it.
    Text(String),
    /// An already-structured object.
    Structured(serde_json::Value),
}

impl From<&str> for MessageData {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MessageData {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for MessageData {
    fn from(v: serde_json::Value) -> Self {
        Self::Structured(v)
    }
}

pub type Listener = Arc<dyn Fn(&MessageData) + Send + Sync>;

/// Identifies one registration on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A target that can deliver `message` events.
pub trait EventSurface: Send + Sync {
    fn name(&self) -> &str;

    fn add_listener(&self, listener: Listener) -> ListenerId;

    /// Remove a registration. Returns `false` if it was not present.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// In-process event target used by hosts that push messages from Rust.
pub struct HostEventTarget {
    name: String,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl HostEventTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The page-level `window` target.
    pub fn window() -> Self {
        Self::new("window")
    }

    /// The `document` target used by some Android WebViews.
    pub fn document() -> Self {
        Self::new("document")
    }

    /// Registrations stay usable after a listener panicked mid-update.
    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a message event to every listener, in registration order.
    /// Returns how many listeners ran.
    pub fn dispatch(&self, data: impl Into<MessageData>) -> usize {
        let data = data.into();
        // Listeners run outside the lock so they may add or remove registrations.
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in &listeners {
            listener(&data);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }
}

impl EventSurface for HostEventTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_listener(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push((id, listener));
        debug!(surface = %self.name, ?id, "listener added");
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        let removed = listeners.len() != before;
        if removed {
            debug!(surface = %self.name, ?id, "listener removed");
        }
        removed
    }
}
