//! L4 Atomic Layer: Transition settings
//!
//! Extends the core carousel config with the derived values the animator
//! needs.

use std::time::Duration;

pub use newsreel_core::CarouselConfig;

use super::easing::EasingType;

pub trait TransitionConfigExt {
    fn transition_duration(&self) -> Duration;

    /// Whether page changes animate at all
    fn is_animated(&self) -> bool;
}

impl TransitionConfigExt for CarouselConfig {
    #[inline]
    fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    #[inline]
    fn is_animated(&self) -> bool {
        self.transition_ms > 0 && self.easing != EasingType::None
    }
}
