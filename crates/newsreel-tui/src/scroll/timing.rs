//! L4 Atomic Layer: Progress and interpolation helpers
//!
//! Time is always passed in, so every function here is deterministic.

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, in [0, 1]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Frame period for `fps`; 0 falls back to ~60fps
#[inline]
pub fn frame_duration(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 100.0, 0.0), 0.0);
        assert_eq!(lerp(100.0, 200.0, 0.5), 150.0);
        assert_eq!(lerp(300.0, 200.0, 1.0), 200.0);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_secs(1), duration), 1.0);
        assert_eq!(progress(start, start, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(60), Duration::from_millis(16));
        assert_eq!(frame_duration(0), Duration::from_millis(16));
        assert_eq!(frame_duration(5000), Duration::from_millis(1));
    }
}
