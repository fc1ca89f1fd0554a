//! Native bridge configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Handler name under `webkit.messageHandlers`.
    pub webkit_handler: String,
    /// Log messages at info level when no native host is present.
    pub log_fallback: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            webkit_handler: "nativeBridge".to_string(),
            log_fallback: true,
        }
    }
}
