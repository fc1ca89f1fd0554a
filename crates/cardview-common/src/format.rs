//! Display formatting for card amounts, numbers and dates.

use chrono::{Datelike, NaiveDate};

/// Format an amount as Brazilian reais, e.g. `R$ 12.500,00`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

/// Masked card number showing only the last four digits.
pub fn mask_card_number(last_four_digits: &str) -> String {
    format!("•••• •••• •••• {last_four_digits}")
}

/// Expiry as `MM/YY`.
pub fn format_expiry(month: u32, year: i32) -> String {
    format!("{:02}/{:02}", month, year.rem_euclid(100))
}

/// A card counts as expired from the first day of its expiration month.
pub fn is_expired(month: u32, year: i32, today: NaiveDate) -> bool {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(expiry) => expiry <= today,
        None => true,
    }
}

/// Short day + month label used for due and closing dates, e.g. `27 out.`.
pub fn format_short_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
        "dez.",
    ];
    format!("{} {}", date.day(), MONTHS[date.month0() as usize])
}
