use serde::{Deserialize, Serialize};

/// Account actions the page can ask the host to perform on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardActionType {
    Block,
    Unblock,
    VirtualCard,
    ChangeLimit,
    ChangePassword,
    ViewInvoice,
    CopyNumber,
    AnticipatePayment,
}

impl CardActionType {
    pub const ALL: [CardActionType; 8] = [
        Self::Block,
        Self::Unblock,
        Self::VirtualCard,
        Self::ChangeLimit,
        Self::ChangePassword,
        Self::ViewInvoice,
        Self::CopyNumber,
        Self::AnticipatePayment,
    ];

    /// Name sent in the `action` field of a CARD_ACTION payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Unblock => "unblock",
            Self::VirtualCard => "virtual-card",
            Self::ChangeLimit => "change-limit",
            Self::ChangePassword => "change-password",
            Self::ViewInvoice => "view-invoice",
            Self::CopyNumber => "copy-number",
            Self::AnticipatePayment => "anticipate-payment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl std::fmt::Display for CardActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for action in CardActionType::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn from_name_lookup() {
        assert_eq!(
            CardActionType::from_name("change-limit"),
            Some(CardActionType::ChangeLimit)
        );
        assert_eq!(CardActionType::from_name("CHANGE-LIMIT"), None);
        assert_eq!(CardActionType::from_name(""), None);
    }
}
