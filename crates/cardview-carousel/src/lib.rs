//! Card carousel selection.
//!
//! A horizontally scrolling carousel, its dot indicator and the details
//! panel must agree on one selected card even though three inputs compete
//! to change it: drag gestures, taps, and selection by id from outside.
//! [`SelectionCoordinator`] resolves them under a single-writer rule: only
//! the carousel's settle event assigns the index.

pub mod carousel;
pub mod coordinator;
pub mod view;

pub use carousel::{Carousel, CarouselOptions, SnapCarousel};
pub use coordinator::{CallbackSink, ScrollPhase, SelectionCoordinator, SelectionSink};
pub use view::{CarouselItem, CarouselView, EmptyState};
