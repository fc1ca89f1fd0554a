//! The scrolling surface the coordinator drives.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A snapping carousel. Scrolls are requested here; their completion comes
/// back to the coordinator as a settle.
pub trait Carousel {
    /// Snap the carousel is resting on, or heading to while animating.
    fn selected_snap(&self) -> usize;

    /// Start moving toward `index`.
    fn scroll_to(&mut self, index: usize);

    /// The slide set was replaced. Resets to `start_index`.
    fn reinit(&mut self, slide_count: usize, start_index: usize);
}

/// Carousel behaviour options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    pub start_index: usize,
    /// Wrap around past the last slide.
    pub looped: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            looped: false,
        }
    }
}

/// Headless snapping carousel.
///
/// Requested scrolls stay pending until [`settle`](Self::settle) reports the
/// carousel at rest, mirroring the asynchronous animation of a real one.
#[derive(Debug, Clone)]
pub struct SnapCarousel {
    options: CarouselOptions,
    slide_count: usize,
    resting: usize,
    pending: Option<usize>,
    scroll_requests: Vec<usize>,
}

impl SnapCarousel {
    pub fn new(options: CarouselOptions) -> Self {
        Self {
            resting: options.start_index,
            options,
            slide_count: 0,
            pending: None,
            scroll_requests: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Snap the carousel last came to rest on.
    pub fn resting_snap(&self) -> usize {
        self.resting
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Every index passed to [`Carousel::scroll_to`], oldest first.
    pub fn scroll_requests(&self) -> &[usize] {
        &self.scroll_requests
    }

    /// A user drag released toward `index`. Clamped to the slide range, or
    /// wrapped when looping.
    pub fn drag_to(&mut self, index: usize) {
        if self.slide_count == 0 {
            return;
        }
        let target = if self.options.looped {
            index % self.slide_count
        } else {
            index.min(self.slide_count - 1)
        };
        debug!(target, "carousel drag released");
        self.pending = Some(target);
    }

    /// Finish the current movement. Returns the snap the carousel came to
    /// rest on, or `None` when nothing was moving.
    pub fn settle(&mut self) -> Option<usize> {
        let target = self.pending.take()?;
        self.resting = target;
        debug!(index = target, "carousel settled");
        Some(target)
    }
}

impl Default for SnapCarousel {
    fn default() -> Self {
        Self::new(CarouselOptions::default())
    }
}

impl Carousel for SnapCarousel {
    fn selected_snap(&self) -> usize {
        self.pending.unwrap_or(self.resting)
    }

    fn scroll_to(&mut self, index: usize) {
        self.scroll_requests.push(index);
        if index >= self.slide_count {
            return;
        }
        self.pending = Some(index);
    }

    fn reinit(&mut self, slide_count: usize, start_index: usize) {
        self.slide_count = slide_count;
        self.pending = None;
        self.resting = if start_index < slide_count { start_index } else { 0 };
    }
}
