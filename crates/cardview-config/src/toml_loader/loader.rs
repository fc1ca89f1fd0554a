//! Core TOML config loading: read from path or platform default.

use crate::schema::CardviewConfig;
use crate::validation;
use cardview_common::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A file that parses but fails
/// validation is replaced by the default config, with a warning.
pub fn load_from_path(path: &Path) -> Result<CardviewConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: CardviewConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "invalid config, using defaults: {e}");
        return Ok(CardviewConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `$CARDVIEW_CONFIG`, or else the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/cardview/config.toml`
/// On Linux: `~/.config/cardview/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<CardviewConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(CardviewConfig::default())
        }
        Err(e) => Err(e),
    }
}
