//! Single authority for which card is selected.

use std::sync::Arc;

use cardview_bridge::BridgeChannel;
use cardview_common::Card;
use tracing::debug;

use crate::carousel::Carousel;
use crate::view::{CarouselItem, CarouselView, EmptyState};

/// Receives the selected card whenever the selection is published.
pub trait SelectionSink {
    fn card_selected(&mut self, card: &Card);
}

impl SelectionSink for BridgeChannel {
    fn card_selected(&mut self, card: &Card) {
        self.notify_card_selected(&card.id);
    }
}

/// Adapts a closure into a [`SelectionSink`].
pub struct CallbackSink<F>(pub F);

impl<F: FnMut(&Card)> SelectionSink for CallbackSink<F> {
    fn card_selected(&mut self, card: &Card) {
        (self.0)(card)
    }
}

/// Where the carousel is relative to the last requested target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// No cards, or nothing requested since the cards were set.
    Idle,
    /// A tap, dot or external id asked the carousel to move.
    ScrollRequested { target: usize },
    /// The carousel reported rest; the index is authoritative.
    Settled,
}

/// Reconciles drag settles, taps and external selection into one index.
///
/// Only [`on_settle`](Self::on_settle) writes the index. Taps, dot clicks and
/// external ids request a scroll and wait for the carousel to settle.
pub struct SelectionCoordinator<C: Carousel> {
    carousel: C,
    sink: Box<dyn SelectionSink>,
    cards: Arc<[Card]>,
    selected_index: Option<usize>,
    last_notified: Option<String>,
    external_id: Option<String>,
    phase: ScrollPhase,
    show_dots: bool,
    start_index: usize,
}

impl<C: Carousel> SelectionCoordinator<C> {
    pub fn new(carousel: C, sink: Box<dyn SelectionSink>) -> Self {
        Self {
            carousel,
            sink,
            cards: Arc::from(Vec::new()),
            selected_index: None,
            last_notified: None,
            external_id: None,
            phase: ScrollPhase::Idle,
            show_dots: true,
            start_index: 0,
        }
    }

    pub fn with_dots(mut self, show_dots: bool) -> Self {
        self.show_dots = show_dots;
        self
    }

    /// Index adopted when cards arrive with nothing selected yet.
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn carousel(&self) -> &C {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut C {
        &mut self.carousel
    }

    pub fn cards(&self) -> &Arc<[Card]> {
        &self.cards
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected_index?)
    }

    /// Replace the whole card sequence.
    ///
    /// An index that no longer fits falls back to 0. The resulting card is
    /// published if it differs from the last one, and a pending external id
    /// is re-resolved against the new cards.
    pub fn set_cards(&mut self, cards: Arc<[Card]>) {
        self.cards = cards;

        if self.cards.is_empty() {
            self.carousel.reinit(0, 0);
            self.selected_index = None;
            self.last_notified = None;
            self.phase = ScrollPhase::Idle;
            debug!("carousel emptied, selection cleared");
            return;
        }

        let index = match self.selected_index {
            Some(i) if i < self.cards.len() => i,
            Some(stale) => {
                debug!(stale, len = self.cards.len(), "selection out of range, reset to 0");
                0
            }
            None if self.start_index < self.cards.len() => self.start_index,
            None => 0,
        };

        self.carousel.reinit(self.cards.len(), index);
        self.phase = ScrollPhase::Idle;
        self.adopt(index);
        self.reconcile_external();
    }

    /// The carousel came to rest on `index`. This is the only writer of the
    /// selected index.
    pub fn on_settle(&mut self, index: usize) {
        if index >= self.cards.len() {
            debug!(index, len = self.cards.len(), "settle outside card range ignored");
            return;
        }
        self.phase = ScrollPhase::Settled;
        self.adopt(index);
        self.release_external(index);
    }

    /// The user tapped the card at `index`.
    ///
    /// The centered card is published again without scrolling; any other
    /// card is scrolled to and published once the carousel settles.
    pub fn tap(&mut self, index: usize) {
        if index >= self.cards.len() {
            return;
        }
        if self.selected_index == Some(index) {
            self.publish(index);
            self.release_external(index);
        } else {
            self.request_scroll(index);
        }
    }

    /// A dot in the indicator was clicked.
    pub fn dot_click(&mut self, index: usize) {
        self.request_scroll(index);
    }

    /// Selection driven from outside by card id. `None` clears it.
    /// Unknown ids are ignored.
    pub fn select_external(&mut self, card_id: Option<&str>) {
        self.external_id = card_id.map(str::to_string);
        self.reconcile_external();
    }

    fn reconcile_external(&mut self) {
        let Some(id) = self.external_id.as_deref() else {
            return;
        };
        let Some(index) = self.cards.iter().position(|c| c.id == id) else {
            debug!(card_id = %id, "external selection not found");
            return;
        };
        if index != self.carousel.selected_snap() {
            self.request_scroll(index);
        }
    }

    /// The user landed on `index`; an external id naming another card no
    /// longer describes the selection.
    fn release_external(&mut self, index: usize) {
        let Some(id) = self.external_id.as_deref() else {
            return;
        };
        if id != self.cards[index].id {
            debug!(card_id = %id, settled = %self.cards[index].id, "external selection released");
            self.external_id = None;
        }
    }

    fn request_scroll(&mut self, index: usize) {
        if index >= self.cards.len() {
            debug!(index, len = self.cards.len(), "scroll request outside card range ignored");
            return;
        }
        debug!(target = index, "scroll requested");
        self.phase = ScrollPhase::ScrollRequested { target: index };
        self.carousel.scroll_to(index);
    }

    /// Take `index` as the selection and publish it if the card changed.
    fn adopt(&mut self, index: usize) {
        self.selected_index = Some(index);
        let changed = self.last_notified.as_deref() != Some(self.cards[index].id.as_str());
        if changed {
            self.publish(index);
        }
    }

    fn publish(&mut self, index: usize) {
        let card = &self.cards[index];
        debug!(index, card_id = %card.id, "card selected");
        self.sink.card_selected(card);
        self.last_notified = Some(card.id.clone());
    }

    /// Render model for the carousel and its dot indicator.
    pub fn view(&self) -> CarouselView {
        if self.cards.is_empty() {
            return CarouselView::Empty(EmptyState::default());
        }

        let items = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let is_center = self.selected_index == Some(i);
                let is_selected = match &self.external_id {
                    Some(id) => &card.id == id,
                    None => is_center,
                };
                CarouselItem {
                    card_id: card.id.clone(),
                    is_center,
                    is_selected,
                }
            })
            .collect();

        let dots = (self.show_dots && self.cards.len() > 1).then(|| {
            (0..self.cards.len())
                .map(|i| self.selected_index == Some(i))
                .collect()
        });

        CarouselView::Cards { items, dots }
    }
}
