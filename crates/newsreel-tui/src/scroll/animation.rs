//! L3 Molecular Layer: Carousel surface animator
//!
//! Plays the role of the scrolling list: it owns the *observed* position,
//! moves it toward targets the controller asks for, and reports every change
//! so the host can feed it back through `on_scroll_position_changed`.

use std::time::{Duration, Instant};

use newsreel_core::carousel::ScrollCommand;
use newsreel_core::CarouselConfig;

use super::config::TransitionConfigExt;
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{lerp, progress};

#[derive(Debug, Clone, Copy)]
struct Transition {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
    /// Coming to rest after a drag release
    momentum: bool,
}

#[derive(Debug, Clone)]
pub struct SurfaceAnimator {
    transition: Option<Transition>,
    position: f64,
    duration: Duration,
    easing: EasingType,
    animated: bool,
    /// Position changed since the last `update`
    dirty: bool,
    /// Where the last momentum transition stopped, until taken
    settled: Option<f64>,
}

impl SurfaceAnimator {
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            transition: None,
            position: 0.0,
            duration: config.transition_duration(),
            easing: config.easing,
            animated: config.is_animated(),
            dirty: false,
            settled: None,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Final position once the running transition completes
    pub fn target(&self) -> f64 {
        self.transition.map(|t| t.to).unwrap_or(self.position)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether the next frame has something to report
    pub fn needs_update(&self) -> bool {
        self.transition.is_some() || self.dirty || self.settled.is_some()
    }

    /// Move instantly, dropping any running transition
    pub fn jump_to(&mut self, offset: f64) {
        self.transition = None;
        self.set_position(offset);
    }

    /// Start a transition from the current position
    pub fn animate_to(&mut self, target: f64, now: Instant) {
        self.start(target, now, false);
    }

    /// Settle on `target` after a drag; completion is reported by
    /// [`SurfaceAnimator::take_settled`]
    pub fn settle_to(&mut self, target: f64, now: Instant) {
        self.start(target, now, true);
    }

    /// Carry out a controller command
    pub fn apply(&mut self, command: ScrollCommand, now: Instant) {
        if let Some(rebase) = command.rebase {
            self.jump_to(rebase);
        }
        if command.animate {
            self.animate_to(command.target, now);
        } else {
            self.jump_to(command.target);
        }
    }

    /// Freeze at the current position
    pub fn cancel(&mut self) {
        self.transition = None;
    }

    /// Advance to `now`; returns the position when it changed
    pub fn update(&mut self, now: Instant) -> Option<f64> {
        if let Some(transition) = self.transition {
            let t = progress(transition.start, now, transition.duration);
            if t >= 1.0 {
                self.transition = None;
                self.set_position(transition.to);
                if transition.momentum {
                    self.settled = Some(transition.to);
                }
            } else {
                let eased = transition.easing.apply(t);
                self.set_position(lerp(transition.from, transition.to, eased));
            }
        }

        if std::mem::take(&mut self.dirty) {
            Some(self.position)
        } else {
            None
        }
    }

    /// Position a momentum transition came to rest at, once
    pub fn take_settled(&mut self) -> Option<f64> {
        self.settled.take()
    }

    fn start(&mut self, target: f64, now: Instant, momentum: bool) {
        let target = target.max(0.0);
        if !self.animated || (target - self.position).abs() < f64::EPSILON {
            self.jump_to(target);
            if momentum {
                self.settled = Some(target);
            }
            return;
        }

        self.transition = Some(Transition {
            start: now,
            from: self.position,
            to: target,
            duration: self.duration,
            easing: self.easing,
            momentum,
        });
    }

    fn set_position(&mut self, offset: f64) {
        let offset = offset.max(0.0);
        if offset != self.position {
            self.position = offset;
            self.dirty = true;
        }
    }
}
