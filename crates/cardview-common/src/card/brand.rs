use serde::{Deserialize, Serialize};

/// Card network. Unrecognized names map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Elo,
    Amex,
    Hipercard,
    #[serde(other)]
    Unknown,
}

/// Background gradient and foreground colors for rendering a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardColor {
    pub primary: String,
    pub secondary: String,
    pub text: String,
}

impl CardColor {
    fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            text: "#FFFFFF".to_string(),
        }
    }
}

/// Default palette for a brand.
pub fn color_for_brand(brand: CardBrand) -> CardColor {
    match brand {
        CardBrand::Visa => CardColor::new("#EC7000", "#D35400"),
        CardBrand::Mastercard => CardColor::new("#003366", "#002244"),
        CardBrand::Elo => CardColor::new("#FF8C2E", "#EC7000"),
        CardBrand::Amex => CardColor::new("#1A4D7C", "#003366"),
        CardBrand::Hipercard => CardColor::new("#EC7000", "#C55A00"),
        CardBrand::Unknown => CardColor::new("#5C6370", "#3D4450"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_brand_name_deserializes_as_unknown() {
        let brand: CardBrand = serde_json::from_str("\"diners\"").unwrap();
        assert_eq!(brand, CardBrand::Unknown);
    }

    #[test]
    fn brand_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&CardBrand::Mastercard).unwrap(),
            "\"mastercard\""
        );
        let brand: CardBrand = serde_json::from_str("\"hipercard\"").unwrap();
        assert_eq!(brand, CardBrand::Hipercard);
    }

    #[test]
    fn palettes_use_white_text() {
        for brand in [
            CardBrand::Visa,
            CardBrand::Mastercard,
            CardBrand::Elo,
            CardBrand::Amex,
            CardBrand::Hipercard,
            CardBrand::Unknown,
        ] {
            assert_eq!(color_for_brand(brand).text, "#FFFFFF");
        }
    }

    #[test]
    fn unknown_palette_is_gray() {
        let color = color_for_brand(CardBrand::Unknown);
        assert_eq!(color.primary, "#5C6370");
        assert_eq!(color.secondary, "#3D4450");
    }
}
