//! Render model produced by the coordinator.

use serde::Serialize;

/// Placeholder shown when there are no cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub description: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "Nenhum cartão encontrado",
            description: "Você ainda não possui cartões cadastrados. \
                          Adicione um novo cartão para começar.",
        }
    }
}

/// One slide in the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselItem {
    pub card_id: String,
    /// Slide sits at the carousel's selected snap.
    pub is_center: bool,
    /// Slide is highlighted; follows the external id when one is set.
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselView {
    Empty(EmptyState),
    Cards {
        items: Vec<CarouselItem>,
        /// Active flag per dot; `None` when the indicator is hidden.
        dots: Option<Vec<bool>>,
    },
}

impl CarouselView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Index of the centered slide, if any.
    pub fn center_index(&self) -> Option<usize> {
        match self {
            Self::Empty(_) => None,
            Self::Cards { items, .. } => items.iter().position(|item| item.is_center),
        }
    }
}
