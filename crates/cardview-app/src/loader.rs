//! Card sources for the page.

use std::time::Duration;

use async_trait::async_trait;
use cardview_common::{color_for_brand, Card, CardBrand, CardStatus, CardviewError};
use cardview_config::LoaderConfig;
use tracing::debug;

/// Produces the card list shown when the page mounts.
#[async_trait]
pub trait CardLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<Card>, CardviewError>;
}

/// Returns the built-in demo cards after a simulated round-trip.
#[derive(Debug, Clone)]
pub struct MockCardLoader {
    delay: Duration,
}

impl MockCardLoader {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(Duration::from_millis(u64::from(config.delay_ms)))
    }
}

#[async_trait]
impl CardLoader for MockCardLoader {
    async fn load(&self) -> Result<Vec<Card>, CardviewError> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating card fetch");
            tokio::time::sleep(self.delay).await;
        }
        Ok(mock_cards())
    }
}

/// Demo cards for development and the headless shell.
pub fn mock_cards() -> Vec<Card> {
    let card = |id: &str,
                last_four: &str,
                (month, year): (u32, i32),
                brand: CardBrand,
                status: CardStatus,
                (limit, available): (f64, f64),
                is_virtual: bool| Card {
        id: id.to_string(),
        last_four_digits: last_four.to_string(),
        cardholder_name: "Gabriel Silva".to_string(),
        expiration_month: month,
        expiration_year: year,
        brand,
        status,
        limit,
        available_limit: available,
        is_virtual,
        color: Some(color_for_brand(brand)),
    };

    vec![
        card(
            "card-001",
            "4589",
            (8, 2028),
            CardBrand::Visa,
            CardStatus::Active,
            (15000.0, 12500.0),
            false,
        ),
        card(
            "card-002",
            "7821",
            (3, 2027),
            CardBrand::Mastercard,
            CardStatus::Active,
            (8000.0, 4200.0),
            false,
        ),
        card(
            "card-003",
            "1234",
            (12, 2026),
            CardBrand::Elo,
            CardStatus::Blocked,
            (5000.0, 5000.0),
            true,
        ),
    ]
}
