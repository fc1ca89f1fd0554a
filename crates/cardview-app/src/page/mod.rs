//! The cards page: loading, carousel selection, details and actions.

mod details;

pub use details::{CardDetails, InvoiceSummary};

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use cardview_bridge::{BridgeChannel, Envelope};
use cardview_carousel::{
    CallbackSink, CarouselOptions, CarouselView, ScrollPhase, SelectionCoordinator, SnapCarousel,
};
use cardview_common::{Card, CardActionType, Result};
use cardview_config::CarouselConfig;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::loader::CardLoader;
use crate::store::{CardStore, StoreUpdate};

/// Snapshot of everything the page would render.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub loading: bool,
    pub error: Option<String>,
    pub carousel: CarouselView,
    /// Slide the carousel is moving to, while a scroll is pending.
    pub scroll_target: Option<usize>,
    pub details: Option<CardDetails>,
}

pub struct CardsPage {
    channel: BridgeChannel,
    store: CardStore,
    coordinator: SelectionCoordinator<SnapCarousel>,
    /// Card ids the coordinator published and the store has not taken yet.
    published: Rc<RefCell<Vec<String>>>,
}

impl CardsPage {
    pub fn new(channel: BridgeChannel, config: &CarouselConfig) -> Self {
        let start_index = config.start_index as usize;
        let carousel = SnapCarousel::new(CarouselOptions {
            start_index,
            looped: false,
        });
        let published = Rc::new(RefCell::new(Vec::new()));
        let outbox = Rc::clone(&published);
        let sink = CallbackSink(move |card: &Card| outbox.borrow_mut().push(card.id.clone()));
        let coordinator = SelectionCoordinator::new(carousel, Box::new(sink))
            .with_dots(config.show_dots)
            .with_start_index(start_index);

        let mut store = CardStore::new(channel.clone());
        store.set_loading(true);

        Self {
            channel,
            store,
            coordinator,
            published,
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.store.selected_card()
    }

    /// Load the initial cards, select the first one and announce READY.
    pub async fn mount(&mut self, loader: &dyn CardLoader) -> Result<()> {
        self.store.set_loading(true);
        let loaded = loader.load().await;
        self.store.set_loading(false);

        let outcome = match loaded {
            Ok(cards) => {
                self.apply_cards(cards);
                info!(count = self.store.cards().len(), "cards loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "card loading failed");
                self.store.set_error(e.to_string());
                self.channel.notify_error(&e.to_string());
                Err(e)
            }
        };

        self.channel.notify_ready();
        outcome
    }

    fn apply_cards(&mut self, cards: Vec<Card>) {
        let cards = self.store.replace_cards(cards);
        self.coordinator.set_cards(cards);
        self.sync_selection();
    }

    /// Hand every published selection to the store, which tells the host.
    fn sync_selection(&mut self) {
        let ids: Vec<String> = self.published.borrow_mut().drain(..).collect();
        for id in ids {
            self.store.select_card(&id);
        }
    }

    pub fn tap(&mut self, index: usize) {
        self.coordinator.tap(index);
        self.sync_selection();
    }

    pub fn dot_click(&mut self, index: usize) {
        self.coordinator.dot_click(index);
    }

    /// A drag released toward `index`, or the end of a requested scroll
    /// when `None`. Returns the snap the carousel came to rest on.
    pub fn settle(&mut self, index: Option<usize>) -> Option<usize> {
        if let Some(index) = index {
            self.coordinator.carousel_mut().drag_to(index);
        }
        let resting = self.coordinator.carousel_mut().settle()?;
        self.coordinator.on_settle(resting);
        self.sync_selection();
        Some(resting)
    }

    /// Steer the carousel to `card_id`. The selection changes once it settles.
    pub fn select_card(&mut self, card_id: &str) {
        self.coordinator.select_external(Some(card_id));
    }

    /// Send `action` for the selected card. Returns false with no selection.
    pub fn handle_action(&self, action: CardActionType) -> bool {
        match self.store.selected_card() {
            Some(card) => {
                debug!(card_id = %card.id, %action, "card action");
                self.channel.notify_card_action(&card.id, action.as_str());
                true
            }
            None => {
                debug!(%action, "action ignored, no card selected");
                false
            }
        }
    }

    pub fn refresh(&mut self) {
        self.store.refresh_cards();
    }

    /// Apply a message from the host.
    pub fn handle_message(&mut self, envelope: &Envelope) {
        if self.store.apply_message(envelope) == StoreUpdate::CardsReplaced {
            let cards = Arc::clone(self.store.cards());
            self.coordinator.set_cards(cards);
            self.sync_selection();
        }
    }

    pub fn details(&self, today: NaiveDate) -> Option<CardDetails> {
        let card = self.store.selected_card()?;
        Some(CardDetails::build(
            card,
            &InvoiceSummary::placeholder(today),
            today,
        ))
    }

    pub fn view(&self) -> PageView {
        let today = Local::now().date_naive();
        PageView {
            loading: self.store.is_loading(),
            error: self.store.error().map(str::to_string),
            carousel: self.coordinator.view(),
            scroll_target: match self.coordinator.phase() {
                ScrollPhase::ScrollRequested { target } => Some(target),
                ScrollPhase::Idle | ScrollPhase::Settled => None,
            },
            details: self.details(today),
        }
    }
}
