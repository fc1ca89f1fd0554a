//! Card collection state shared by the page.

use std::sync::Arc;

use cardview_bridge::{BridgeChannel, Envelope, Message};
use cardview_common::{Card, CardStatus};
use tracing::{debug, info, warn};

/// What an inbound message changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreUpdate {
    Unchanged,
    CardsReplaced,
    Failed,
}

/// Holds the card list, the selected card id and the loading/error flags.
pub struct CardStore {
    channel: BridgeChannel,
    cards: Arc<[Card]>,
    selected_card_id: Option<String>,
    is_loading: bool,
    error: Option<String>,
}

impl CardStore {
    pub fn new(channel: BridgeChannel) -> Self {
        Self {
            channel,
            cards: Arc::from(Vec::new()),
            selected_card_id: None,
            is_loading: false,
            error: None,
        }
    }

    pub fn cards(&self) -> &Arc<[Card]> {
        &self.cards
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Replace every card. Cards breaking the limit or expiry rules are
    /// dropped. A selected id that disappears is cleared.
    pub fn replace_cards(&mut self, cards: Vec<Card>) -> Arc<[Card]> {
        let total = cards.len();
        let valid: Vec<Card> = cards
            .into_iter()
            .filter(|card| match card.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(card_id = %card.id, error = %e, "dropping invalid card");
                    false
                }
            })
            .collect();

        debug!(total, kept = valid.len(), "cards replaced");
        self.cards = Arc::from(valid);

        if let Some(id) = &self.selected_card_id {
            if self.get_card_by_id(id).is_none() {
                self.selected_card_id = None;
            }
        }
        Arc::clone(&self.cards)
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.get_card_by_id(self.selected_card_id.as_deref()?)
    }

    /// Select a card by id and tell the host. Unknown ids are ignored.
    pub fn select_card(&mut self, card_id: &str) -> bool {
        if self.get_card_by_id(card_id).is_none() {
            debug!(card_id, "select ignored, unknown card");
            return false;
        }
        self.selected_card_id = Some(card_id.to_string());
        self.channel.notify_card_selected(card_id);
        true
    }

    /// Ask the host for fresh cards. The answer arrives as DATA_RESPONSE.
    pub fn refresh_cards(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.channel.request_data("cards");
    }

    pub fn get_card_by_id(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn active_cards(&self) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.is_active()).collect()
    }

    pub fn cards_by_status(&self, status: CardStatus) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.status == status).collect()
    }

    /// Fold a host message into the store.
    pub fn apply_message(&mut self, envelope: &Envelope) -> StoreUpdate {
        match &envelope.message {
            Message::DataResponse(payload) => match &payload.cards {
                Some(cards) => {
                    self.replace_cards(cards.clone());
                    self.is_loading = false;
                    info!(count = self.cards.len(), "cards received from host");
                    StoreUpdate::CardsReplaced
                }
                None => {
                    debug!("data response without cards ignored");
                    StoreUpdate::Unchanged
                }
            },
            Message::Error(payload) => {
                warn!(error = %payload.error, "host reported an error");
                self.error = Some(payload.error.clone());
                self.is_loading = false;
                StoreUpdate::Failed
            }
            other => {
                debug!(kind = %other.kind(), "host message not handled by store");
                StoreUpdate::Unchanged
            }
        }
    }
}
