//! Breaking news carousel
//!
//! Layered from pure math up to a mounted component:
//!
//! ## L4 Atomic Layer
//! - [`interpolate`] - Page math and offset-to-transform mapping
//! - [`dataset`] - Grow-only looped article window
//!
//! ## L3 Molecular Layer
//! - [`controller`] - Offset ownership and the autoplay gate
//! - [`slide`], [`pagination`] - Read-only render models
//!
//! ## L2 Organism Layer
//! - [`autoplay`] - Timer task that emits ticks
//! - [`mount`] - Controller, render models and timer as one unit
//!
//! The controller is the only writer of the scroll offset. Slides and the
//! pagination indicator read the surface position through an
//! [`OffsetHandle`].

pub mod autoplay;
pub mod controller;
pub mod dataset;
pub mod interpolate;
pub mod mount;
pub mod pagination;
pub mod slide;

use thiserror::Error;

pub use autoplay::{AutoplayTick, AutoplayTimer};
pub use controller::{AutoplayState, CarouselController, OffsetHandle, ScrollCommand};
pub use dataset::CarouselDataset;
pub use interpolate::{
    active_index, interpolate, interpolate_with, page_at, Transform, TransformRange,
};
pub use mount::Carousel;
pub use pagination::{Dot, PaginationIndicator};
pub use slide::{SlideFrame, SlideRenderer};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("carousel needs at least one article")]
    EmptyDataset,

    #[error("item width must be a positive finite number, got {0}")]
    InvalidItemWidth(f64),
}
