//! Configuration schema types for Cardview.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod carousel;
mod loader;
mod logging;

pub use bridge::*;
pub use carousel::*;
pub use loader::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Cardview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardviewConfig {
    pub bridge: BridgeConfig,
    pub loader: LoaderConfig,
    pub carousel: CarouselConfig,
    pub logging: LoggingConfig,
}
