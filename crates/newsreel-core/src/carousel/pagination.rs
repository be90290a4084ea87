//! L3 Molecular Layer: Pagination indicator
//!
//! One dot per original article. Dot emphasis comes from the same
//! interpolation the slides use, evaluated against the position folded back
//! into the first copy of the list. Distances wrap, so the last dot hands
//! its emphasis straight to the first.

use super::controller::OffsetHandle;
use super::interpolate::{active_index, interpolate_with, Transform, TransformRange};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub index: usize,
    pub transform: Transform,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct PaginationIndicator {
    offset: OffsetHandle,
    item_width: f64,
    len: usize,
}

impl PaginationIndicator {
    /// `len` is the original article count, never the looped window length
    pub fn new(offset: OffsetHandle, item_width: f64, len: usize) -> Self {
        Self {
            offset,
            item_width,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical article the surface is on
    pub fn active_index(&self) -> usize {
        active_index(self.offset.get(), self.item_width, self.len)
    }

    /// Dots with their current transforms
    pub fn dots(&self) -> impl Iterator<Item = Dot> + '_ {
        let offset = self.folded_offset();
        let cycle = self.len as f64 * self.item_width;
        let active = self.active_index();
        let degenerate = self.len == 1;

        (0..self.len).map(move |index| {
            if degenerate {
                return Dot {
                    index,
                    transform: TransformRange::DOT.outer,
                    active: false,
                };
            }
            // Measure against whichever copy of the dot is nearer
            let center = index as f64 * self.item_width;
            let local = if offset - center > cycle / 2.0 {
                offset - cycle
            } else {
                offset
            };
            Dot {
                index,
                transform: interpolate_with(local, index, self.item_width, &TransformRange::DOT),
                active: index == active,
            }
        })
    }

    /// Position reduced modulo one full cycle of the originals
    fn folded_offset(&self) -> f64 {
        let cycle = self.len as f64 * self.item_width;
        if cycle > 0.0 {
            self.offset.get().rem_euclid(cycle)
        } else {
            0.0
        }
    }
}
