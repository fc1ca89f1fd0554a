//! Carousel configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub show_dots: bool,
    pub start_index: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            show_dots: true,
            start_index: 0,
        }
    }
}
