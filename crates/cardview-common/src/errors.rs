use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge parse error: {0}")]
    Parse(String),

    #[error("payload does not match {kind}: {reason}")]
    PayloadMismatch { kind: String, reason: String },

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardError {
    #[error("card {id}: limit {limit} is negative")]
    NegativeLimit { id: String, limit: f64 },

    #[error("card {id}: available limit {available} exceeds limit {limit}")]
    AvailableExceedsLimit {
        id: String,
        available: f64,
        limit: f64,
    },

    #[error("card {id}: expiration month {month} is not in 1-12")]
    InvalidExpiryMonth { id: String, month: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum CardviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
