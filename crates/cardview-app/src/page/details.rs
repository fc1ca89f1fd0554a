//! Details panel for the selected card.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use cardview_common::format::{
    format_currency, format_expiry, format_short_date, is_expired, mask_card_number,
};
use cardview_common::{Card, CardActionType, CardBrand};

/// Open invoice summary. Amount and dates are placeholders until the host
/// provides invoice data.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub amount: f64,
    pub due_date: NaiveDate,
    pub closing_date: NaiveDate,
}

impl InvoiceSummary {
    const PLACEHOLDER_AMOUNT: f64 = 231.3;
    const CLOSING_DAYS_BEFORE_DUE: i64 = 8;

    /// Invoice due on the 27th of October of the current year.
    pub fn placeholder(today: NaiveDate) -> Self {
        let due_date = NaiveDate::from_ymd_opt(today.year(), 10, 27).unwrap_or(today);
        Self {
            amount: Self::PLACEHOLDER_AMOUNT,
            due_date,
            closing_date: due_date - Duration::days(Self::CLOSING_DAYS_BEFORE_DUE),
        }
    }
}

/// A button that sends a CARD_ACTION.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAction {
    pub action: CardActionType,
    pub label: &'static str,
}

impl ServiceAction {
    fn new(action: CardActionType, label: &'static str) -> Self {
        Self { action, label }
    }
}

/// Everything rendered under the carousel for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDetails {
    pub card_id: String,
    pub masked_number: String,
    pub cardholder_name: String,
    pub brand: CardBrand,
    pub expiry: String,
    pub expired: bool,
    pub status: &'static str,
    pub is_virtual: bool,
    pub invoice_amount: String,
    pub invoice_action: ServiceAction,
    pub automatic_debit: bool,
    pub due_date: String,
    pub closing_date: String,
    pub available_limit: String,
    pub total_limit: String,
    pub used_limit_percentage: u32,
    pub primary_action: ServiceAction,
    pub services: Vec<ServiceAction>,
}

impl CardDetails {
    pub fn build(card: &Card, invoice: &InvoiceSummary, today: NaiveDate) -> Self {
        let lock_service = if card.is_active() {
            ServiceAction::new(CardActionType::Block, "Bloquear cartão")
        } else {
            ServiceAction::new(CardActionType::Unblock, "Desbloquear cartão")
        };

        Self {
            card_id: card.id.clone(),
            masked_number: mask_card_number(&card.last_four_digits),
            cardholder_name: card.cardholder_name.clone(),
            brand: card.brand,
            expiry: format_expiry(card.expiration_month, card.expiration_year),
            expired: is_expired(card.expiration_month, card.expiration_year, today),
            status: card.status.label(),
            is_virtual: card.is_virtual,
            invoice_amount: format_currency(invoice.amount),
            invoice_action: ServiceAction::new(CardActionType::ViewInvoice, "Acessar fatura"),
            automatic_debit: false,
            due_date: format_short_date(invoice.due_date),
            closing_date: format_short_date(invoice.closing_date),
            available_limit: format_currency(card.available_limit),
            total_limit: format_currency(card.limit),
            used_limit_percentage: card.used_limit_percentage(),
            primary_action: ServiceAction::new(
                CardActionType::AnticipatePayment,
                "Antecipar pagamento",
            ),
            services: vec![
                lock_service,
                ServiceAction::new(CardActionType::VirtualCard, "Cartão virtual"),
                ServiceAction::new(CardActionType::ChangeLimit, "Ajustar limite"),
                ServiceAction::new(CardActionType::ChangePassword, "Alterar senha"),
            ],
        }
    }
}
