//! Full configuration validation.
//!
//! Each check pushes a message; the orchestrator collects them into a
//! single `ConfigError`.

mod helpers;


use crate::schema::CardviewConfig;
use cardview_common::ConfigError;
use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CardviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_bridge(&mut errors, config);
    validate_loader(&mut errors, config);
    validate_carousel(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_bridge(errors: &mut Vec<String>, config: &CardviewConfig) {
    validate_non_empty(errors, "bridge.webkit_handler", &config.bridge.webkit_handler);
    if config.bridge.webkit_handler.chars().any(char::is_whitespace) {
        errors.push(format!(
            "bridge.webkit_handler = {:?} must not contain whitespace",
            config.bridge.webkit_handler
        ));
    }
}

fn validate_loader(errors: &mut Vec<String>, config: &CardviewConfig) {
    validate_range(errors, "loader.delay_ms", config.loader.delay_ms, 0, 10_000);
}

fn validate_carousel(errors: &mut Vec<String>, config: &CardviewConfig) {
    validate_range(errors, "carousel.start_index", config.carousel.start_index, 0, 999);
}
