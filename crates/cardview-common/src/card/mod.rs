//! Credit card records as delivered by a loader or the native host.

mod action;
mod brand;

pub use action::CardActionType;
pub use brand::{color_for_brand, CardBrand, CardColor};

use serde::{Deserialize, Serialize};

use crate::errors::CardError;

/// Lifecycle status of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
    Pending,
}

impl CardStatus {
    /// Display label shown in the card details.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Blocked => "Bloqueado",
            Self::Expired => "Expirado",
            Self::Pending => "Pendente",
        }
    }
}

/// An immutable credit card value. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub last_four_digits: String,
    pub cardholder_name: String,
    pub expiration_month: u32,
    pub expiration_year: i32,
    pub brand: CardBrand,
    pub status: CardStatus,
    pub limit: f64,
    pub available_limit: f64,
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,
}

impl Card {
    /// Check the limit and expiry invariants.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.limit < 0.0 {
            return Err(CardError::NegativeLimit {
                id: self.id.clone(),
                limit: self.limit,
            });
        }
        if self.available_limit > self.limit {
            return Err(CardError::AvailableExceedsLimit {
                id: self.id.clone(),
                available: self.available_limit,
                limit: self.limit,
            });
        }
        if !(1..=12).contains(&self.expiration_month) {
            return Err(CardError::InvalidExpiryMonth {
                id: self.id.clone(),
                month: self.expiration_month,
            });
        }
        Ok(())
    }

    /// The card's own color, or the default palette for its brand.
    pub fn effective_color(&self) -> CardColor {
        self.color
            .clone()
            .unwrap_or_else(|| color_for_brand(self.brand))
    }

    /// Percentage of the limit currently in use.
    pub fn used_limit_percentage(&self) -> u32 {
        used_limit_percentage(self.limit, self.available_limit)
    }

    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}

/// Rounded percentage of `limit` already consumed. Zero for non-positive limits.
pub fn used_limit_percentage(limit: f64, available_limit: f64) -> u32 {
    if limit <= 0.0 {
        return 0;
    }
    let used = (limit - available_limit) / limit * 100.0;
    used.round().clamp(0.0, 100.0) as u32
}
