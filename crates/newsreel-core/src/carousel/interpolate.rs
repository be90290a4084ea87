//! L4 Atomic Layer: Pure offset-to-transform interpolation
//!
//! Maps a scroll offset and an item index to the scale/opacity a slide or
//! indicator dot should be drawn with. Stateless and allocation-free so it
//! can run for every visible item on every frame.

/// Visual transform applied to one slide or dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub opacity: f64,
}

/// Output values at the edges (`outer`) and centre (`center`) of an item's
/// input range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformRange {
    pub outer: Transform,
    pub center: Transform,
}

impl TransformRange {
    /// Slide emphasis: scale [0.9, 1.0, 0.9], opacity [0.5, 1.0, 0.5]
    pub const SLIDE: Self = Self {
        outer: Transform { scale: 0.9, opacity: 0.5 },
        center: Transform { scale: 1.0, opacity: 1.0 },
    };

    /// Pagination dot emphasis: scale [0.8, 1.4, 0.8], opacity [0.4, 1.0, 0.4]
    pub const DOT: Self = Self {
        outer: Transform { scale: 0.8, opacity: 0.4 },
        center: Transform { scale: 1.4, opacity: 1.0 },
    };
}

/// Slide transform for `index` at `offset`
///
/// Input range is `[(index-1)*w, index*w, (index+1)*w]`; outside it the
/// result saturates at the outer values.
#[inline]
pub fn interpolate(offset: f64, index: usize, item_width: f64) -> Transform {
    interpolate_with(offset, index, item_width, &TransformRange::SLIDE)
}

/// Same as [`interpolate`] with a caller-chosen output range
#[inline]
pub fn interpolate_with(
    offset: f64,
    index: usize,
    item_width: f64,
    range: &TransformRange,
) -> Transform {
    let t = centeredness(offset, index, item_width);
    Transform {
        scale: mix(range.outer.scale, range.center.scale, t),
        opacity: mix(range.outer.opacity, range.center.opacity, t),
    }
}

/// Page under `offset` (floor division), never negative
#[inline]
pub fn page_at(offset: f64, item_width: f64) -> usize {
    if !valid_width(item_width) || !offset.is_finite() || offset <= 0.0 {
        return 0;
    }
    (offset / item_width).floor() as usize
}

/// Logical item under `offset` for a list of `len` originals
#[inline]
pub fn active_index(offset: f64, item_width: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    page_at(offset, item_width) % len
}

/// 1.0 when `offset` sits exactly on the item, falling linearly to 0.0 one
/// item-width away in either direction, clamped beyond
#[inline]
fn centeredness(offset: f64, index: usize, item_width: f64) -> f64 {
    if !valid_width(item_width) || !offset.is_finite() {
        return 0.0;
    }
    let center = index as f64 * item_width;
    let distance = (offset - center).abs() / item_width;
    (1.0 - distance).clamp(0.0, 1.0)
}

/// Item widths must be finite and strictly positive
#[inline]
pub fn valid_width(item_width: f64) -> bool {
    item_width.is_finite() && item_width > 0.0
}

#[inline]
fn mix(outer: f64, center: f64, t: f64) -> f64 {
    outer + (center - outer) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 300.0;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_centered_is_full() {
        let t = interpolate(600.0, 2, W);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.opacity, 1.0);
    }

    #[test]
    fn test_neighbours_hit_lower_bound() {
        for offset in [300.0, 900.0] {
            let t = interpolate(offset, 2, W);
            assert!(approx(t.scale, 0.9), "scale at {offset}");
            assert!(approx(t.opacity, 0.5), "opacity at {offset}");
        }
    }

    #[test]
    fn test_halfway_is_linear() {
        let t = interpolate(450.0, 2, W);
        assert!(approx(t.scale, 0.95));
        assert!(approx(t.opacity, 0.75));

        let t = interpolate(750.0, 2, W);
        assert!(approx(t.scale, 0.95));
        assert!(approx(t.opacity, 0.75));
    }

    #[test]
    fn test_clamps_outside_range() {
        for offset in [0.0, 100.0, 1200.0, 1.0e9] {
            let t = interpolate(offset, 2, W);
            assert!(approx(t.scale, 0.9), "scale at {offset}");
            assert!(approx(t.opacity, 0.5), "opacity at {offset}");
        }
    }

    #[test]
    fn test_bounds_hold_everywhere() {
        for index in 0..6 {
            for step in 0..200 {
                let offset = step as f64 * 17.3;
                let t = interpolate(offset, index, W);
                assert!((0.9..=1.0).contains(&t.scale));
                assert!((0.5..=1.0).contains(&t.opacity));
            }
        }
    }

    #[test]
    fn test_index_zero_left_edge() {
        // (index-1)*w is negative for index 0; offsets never go there
        let t = interpolate(0.0, 0, W);
        assert_eq!(t, TransformRange::SLIDE.center);
        let t = interpolate(W, 0, W);
        assert!(approx(t.scale, 0.9));
    }

    #[test]
    fn test_dot_range() {
        let t = interpolate_with(W, 1, W, &TransformRange::DOT);
        assert!(approx(t.scale, 1.4));
        let t = interpolate_with(0.0, 1, W, &TransformRange::DOT);
        assert!(approx(t.scale, 0.8));
        assert!(approx(t.opacity, 0.4));
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(interpolate(0.0, 0, 0.0), TransformRange::SLIDE.outer);
        assert_eq!(interpolate(f64::NAN, 0, W), TransformRange::SLIDE.outer);
        assert_eq!(page_at(500.0, 0.0), 0);
    }

    #[test]
    fn test_active_index_wraps() {
        assert_eq!(active_index(12.0 * W, W, 5), 2);
        assert_eq!(active_index(7.0 * W + 10.0, W, 5), 2);
        assert_eq!(active_index(610.0, W, 3), 2);
        assert_eq!(active_index(910.0, W, 3), 0);
        assert_eq!(active_index(-5.0, W, 3), 0);
        assert_eq!(active_index(100.0, W, 0), 0);
    }
}
