//! Card loading configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Simulated round-trip before mock cards are available
    /// (valid range: 0-10000 ms).
    pub delay_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { delay_ms: 600 }
    }
}
