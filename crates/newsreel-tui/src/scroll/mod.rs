//! Carousel surface animation
//!
//! Moves the carousel's scroll surface between pages with configurable
//! easing, the way a paging list view would.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves (cubic, quintic, exponential)
//! - `timing` - Progress and interpolation helpers
//! - `config` - Transition settings read from [`newsreel_core::CarouselConfig`]
//!
//! ## L3 Molecular Layer
//! - `animation` - [`SurfaceAnimator`], the surface position over time
//!
//! # Usage
//!
//! ```ignore
//! let mut animator = SurfaceAnimator::new(&config.carousel);
//!
//! if let Some(cmd) = carousel.handle_tick(tick) {
//!     animator.apply(cmd);
//! }
//!
//! // Each frame: report the new position back to the controller
//! if let Some(position) = animator.update(Instant::now()) {
//!     carousel.controller_mut().on_scroll_position_changed(position);
//! }
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

pub use animation::SurfaceAnimator;
pub use config::TransitionConfigExt;
pub use easing::{EasingType, EasingTypeExt};
