use std::sync::Arc;

use tracing::debug;

use crate::events::{EventSurface, ListenerId};

/// Whether a subscription's listeners are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Subscribed,
    Unsubscribed,
}

/// Listener registrations made by [`BridgeChannel::listen`](super::BridgeChannel::listen).
///
/// Tied to the owner's mount lifecycle: dropping it detaches the listeners.
pub struct Subscription {
    registrations: Vec<(Arc<dyn EventSurface>, ListenerId)>,
    state: SubscriptionState,
}

impl Subscription {
    pub(super) fn new(registrations: Vec<(Arc<dyn EventSurface>, ListenerId)>) -> Self {
        Self {
            registrations,
            state: SubscriptionState::Subscribed,
        }
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    /// Number of surfaces this subscription is attached to.
    pub fn surface_count(&self) -> usize {
        self.registrations.len()
    }

    /// Remove every listener this subscription added. Idempotent.
    pub fn unsubscribe(&mut self) {
        if self.state == SubscriptionState::Unsubscribed {
            return;
        }
        for (surface, id) in self.registrations.drain(..) {
            surface.remove_listener(id);
            debug!(surface = %surface.name(), "bridge listener detached");
        }
        self.state = SubscriptionState::Unsubscribed;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
