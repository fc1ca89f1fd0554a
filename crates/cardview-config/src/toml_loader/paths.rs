//! Where the config file lives, and writing the commented starter file.

use cardview_common::ConfigError;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::template::default_config_toml;

/// Names a config file that replaces the per-user default.
pub const CONFIG_ENV_VAR: &str = "CARDVIEW_CONFIG";

/// `$CARDVIEW_CONFIG` when set, else `<config dir>/cardview/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var_os(CONFIG_ENV_VAR), dirs::config_dir())
}

fn resolve_config_path(
    env_path: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        debug!(path = ?path, "config path from {CONFIG_ENV_VAR}");
        return Ok(PathBuf::from(path));
    }
    let config_dir = config_dir.ok_or_else(|| {
        ConfigError::ParseError(format!(
            "could not determine config directory; set {CONFIG_ENV_VAR}"
        ))
    })?;
    Ok(config_dir.join("cardview").join("config.toml"))
}

/// Write the starter config at `path`. A file already there is left alone.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config already present, not overwritten");
            return Ok(());
        }
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_err)?;

    info!(path = %path.display(), "created default config");
    Ok(())
}
