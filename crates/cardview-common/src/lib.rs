pub mod card;
pub mod errors;
pub mod format;

pub use card::{
    color_for_brand, used_limit_percentage, Card, CardActionType, CardBrand, CardColor,
    CardStatus,
};
pub use errors::{BridgeError, CardError, CardviewError, ConfigError};

pub type Result<T> = std::result::Result<T, CardviewError>;
