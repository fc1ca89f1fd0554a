//! Cardview configuration.
//!
//! TOML-based configuration for the bridge, card loader, carousel and
//! logging. Every section has defaults so partial configs work out of
//! the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cardview_config::{config_to_json, load_config};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, CardviewConfig, CarouselConfig, LoaderConfig, LogLevel, LoggingConfig,
    CONFIG_SCHEMA_VERSION,
};

use cardview_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path that does not exist is an error; the default path is
/// created from the template on first use.
pub fn load_config(path: Option<&Path>) -> Result<CardviewConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &CardviewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&CardviewConfig::default());
        assert!(json.contains("\"bridge\""));
        assert!(json.contains("\"loader\""));
        assert!(json.contains("\"carousel\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_to_json_uses_defaults() {
        let json = config_to_json(&CardviewConfig::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bridge"]["webkit_handler"], "nativeBridge");
        assert_eq!(value["loader"]["delay_ms"], 600);
        assert_eq!(value["logging"]["level"], "info");
    }

    #[test]
    fn explicit_missing_path_is_file_not_found() {
        let err = load_config(Some(Path::new("/tmp/nonexistent_cardview_config.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
