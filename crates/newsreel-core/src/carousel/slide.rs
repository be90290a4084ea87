//! L3 Molecular Layer: Per-slide render model
//!
//! Turns one materialized dataset slot into what the host draws: the
//! article overlay plus the transform for the current surface position.

use super::controller::OffsetHandle;
use super::dataset::CarouselDataset;
use super::interpolate::{interpolate, page_at, Transform};

/// Everything needed to draw one slide
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame<'a> {
    /// Materialized index of the slide
    pub index: usize,
    pub title: &'a str,
    pub source_name: &'a str,
    pub image_url: Option<&'a str>,
    pub source_icon_url: Option<&'a str>,
    pub transform: Transform,
}

/// Renders slides against a read-only surface position
#[derive(Debug, Clone)]
pub struct SlideRenderer {
    offset: OffsetHandle,
    item_width: f64,
}

impl SlideRenderer {
    pub fn new(offset: OffsetHandle, item_width: f64) -> Self {
        Self { offset, item_width }
    }

    /// Surface position the slides are rendered against
    pub fn position(&self) -> f64 {
        self.offset.get()
    }

    /// Render the slide at `index`, or nothing if the slot holds no article
    pub fn render<'a>(&self, dataset: &'a CarouselDataset, index: usize) -> Option<SlideFrame<'a>> {
        self.render_at(dataset, index, self.offset.get())
    }

    /// Slides intersecting a viewport one item wide, plus one neighbour on
    /// each side so they are ready before they scroll in
    pub fn visible_frames<'a>(&self, dataset: &'a CarouselDataset) -> Vec<SlideFrame<'a>> {
        let offset = self.offset.get();
        let first = page_at(offset, self.item_width).saturating_sub(1);
        (first..first + 4)
            .filter_map(|index| self.render_at(dataset, index, offset))
            .collect()
    }

    fn render_at<'a>(
        &self,
        dataset: &'a CarouselDataset,
        index: usize,
        offset: f64,
    ) -> Option<SlideFrame<'a>> {
        let article = dataset.get(index)?;
        Some(SlideFrame {
            index,
            title: &article.title,
            source_name: article.source_label(),
            image_url: article.image_url.as_deref(),
            source_icon_url: article.source_icon_url.as_deref(),
            transform: interpolate(offset, index, self.item_width),
        })
    }
}
