//! L3 Molecular Layer: Carousel state machine
//!
//! Owns the authoritative scroll offset, the autoplay gate and the looped
//! dataset. Two producers may move the carousel: the autoplay timer and the
//! user's drag gesture. They never write at the same time because every
//! autoplay write passes through [`AutoplayState::accepts_autoplay`].
//!
//! The position the hosting surface actually shows is published separately
//! through a `watch` channel; consumers hold an [`OffsetHandle`] and never
//! write.

use tokio::sync::watch;
use tracing::debug;

use super::dataset::CarouselDataset;
use super::interpolate::{active_index, page_at, valid_width};
use super::CarouselError;
use crate::config::CarouselConfig;
use crate::news::Article;

/// Autoplay gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    Playing,
    Suspended,
}

impl AutoplayState {
    /// The single check every autoplay-originated write goes through
    #[inline]
    pub fn accepts_autoplay(self) -> bool {
        self == AutoplayState::Playing
    }
}

/// Instruction for the hosting scroll surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Offset the surface should end up at
    pub target: f64,
    /// Smooth transition (true) or instant jump (false)
    pub animate: bool,
    /// When set, jump here instantly before moving to `target`
    pub rebase: Option<f64>,
}

/// Read-only view of the surface position
#[derive(Debug, Clone)]
pub struct OffsetHandle {
    rx: watch::Receiver<f64>,
}

impl OffsetHandle {
    /// Current surface position
    #[inline]
    pub fn get(&self) -> f64 {
        *self.rx.borrow()
    }

    /// Whether the position moved since the last `mark_seen`
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Acknowledge the current position
    pub fn mark_seen(&mut self) {
        self.rx.borrow_and_update();
    }

    /// Wait for the next position change; false once the controller is gone
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Breaking news carousel controller
#[derive(Debug)]
pub struct CarouselController {
    dataset: CarouselDataset,
    item_width: f64,
    state: AutoplayState,
    /// Authoritative offset, written by autoplay ticks and gesture ends
    offset: f64,
    /// Surface position as last reported by the host
    position: watch::Sender<f64>,
    /// Page at which the window was last extended
    extension_latch: Option<usize>,
    released: bool,
}

impl CarouselController {
    /// Mount a carousel over `articles` with pages `item_width` wide
    pub fn initialize(
        articles: Vec<Article>,
        item_width: f64,
        config: &CarouselConfig,
    ) -> Result<Self, CarouselError> {
        if articles.is_empty() {
            return Err(CarouselError::EmptyDataset);
        }
        if !valid_width(item_width) {
            return Err(CarouselError::InvalidItemWidth(item_width));
        }

        debug!(
            articles = articles.len(),
            item_width, "Initializing breaking news carousel"
        );

        let (position, _) = watch::channel(0.0);

        Ok(Self {
            dataset: CarouselDataset::new(articles, config.max_window_copies),
            item_width,
            state: AutoplayState::Playing,
            offset: 0.0,
            position,
            extension_latch: None,
            released: false,
        })
    }

    /// New read-only handle on the surface position
    pub fn subscribe(&self) -> OffsetHandle {
        OffsetHandle {
            rx: self.position.subscribe(),
        }
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Last surface position reported by the host
    #[inline]
    pub fn position(&self) -> f64 {
        *self.position.borrow()
    }

    #[inline]
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    #[inline]
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    #[inline]
    pub fn dataset(&self) -> &CarouselDataset {
        &self.dataset
    }

    /// Logical article under the authoritative offset
    pub fn active_index(&self) -> usize {
        active_index(self.offset, self.item_width, self.dataset.original_len())
    }

    /// A single article never advances
    pub fn is_degenerate(&self) -> bool {
        self.dataset.original_len() == 1
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Advance one page if autoplay is allowed to write
    pub fn on_autoplay_tick(&mut self) -> Option<ScrollCommand> {
        if self.released {
            debug!("Discarding autoplay tick after teardown");
            return None;
        }
        if !self.state.accepts_autoplay() {
            debug!("Autoplay tick ignored while suspended");
            return None;
        }
        if self.is_degenerate() {
            return None;
        }

        let mut target = self.offset + self.item_width;
        let mut rebase = None;

        if !self.ensure_covers(page_at(target, self.item_width)) {
            let shift = self.rebase_shift(target);
            self.offset -= shift;
            target -= shift;
            // The surface jumps to where consumers are told it is
            let shifted = (self.position() - shift).max(0.0);
            self.position.send_replace(shifted);
            rebase = Some(shifted);
            debug!(shift, "Rebased capped carousel window");
        }

        self.offset = target;
        Some(ScrollCommand {
            target,
            animate: true,
            rebase,
        })
    }

    /// User started dragging: autoplay stops writing
    pub fn on_drag_start(&mut self) {
        if self.released {
            return;
        }
        self.state = AutoplayState::Suspended;
    }

    /// User released the drag at `final_offset`: it becomes authoritative
    /// and autoplay resumes from there
    pub fn on_drag_end(&mut self, final_offset: f64) {
        if self.released {
            return;
        }
        self.settle(final_offset);
        self.state = AutoplayState::Playing;
    }

    /// The surface came to rest after momentum scrolling
    pub fn on_momentum_end(&mut self, offset: f64) {
        if self.released {
            return;
        }
        self.settle(offset);
    }

    /// High-frequency position report from the surface
    ///
    /// Updates what consumers observe and runs the end-of-window check.
    /// Never changes the autoplay state or emits scroll commands.
    pub fn on_scroll_position_changed(&mut self, offset: f64) {
        if self.released {
            return;
        }
        let offset = sanitize(offset);
        self.position.send_replace(offset);

        if self.is_near_end(offset) {
            self.on_approaching_dataset_end();
        }
    }

    /// Append one more copy of the articles; at most once per threshold
    /// crossing. Returns whether the window grew.
    pub fn on_approaching_dataset_end(&mut self) -> bool {
        if self.released {
            return false;
        }

        let page = page_at(self.position(), self.item_width);
        if self.extension_latch == Some(page) {
            debug!(page, "Dataset extension already done for this crossing");
            return false;
        }
        self.extension_latch = Some(page);

        if !self.dataset.extend() {
            debug!(
                copies = self.dataset.copies(),
                "Dataset window at cap, not extending"
            );
            return false;
        }

        debug!(
            page,
            window = self.dataset.window_len(),
            "Extended carousel dataset"
        );
        true
    }

    /// Release the mount; anything arriving later is ignored
    pub fn teardown(&mut self) {
        if !self.released {
            debug!("Tearing down breaking news carousel");
            self.released = true;
        }
    }

    fn settle(&mut self, offset: f64) {
        let mut offset = sanitize(offset);
        if !self.ensure_covers(page_at(offset, self.item_width)) {
            let last_page = self.dataset.window_len().saturating_sub(1);
            offset = offset.min(last_page as f64 * self.item_width);
        }
        self.offset = offset;
        self.position.send_replace(offset);
    }

    /// Viewport's trailing edge is within one item of the window's end
    fn is_near_end(&self, offset: f64) -> bool {
        let window_end = self.dataset.window_len() as f64 * self.item_width;
        offset + 2.0 * self.item_width >= window_end
    }

    /// Grow the window until `page` is materialized; false if the cap stops it
    fn ensure_covers(&mut self, page: usize) -> bool {
        while page >= self.dataset.window_len() {
            if !self.dataset.extend() {
                return false;
            }
        }
        true
    }

    /// Whole cycles to subtract so `target` lands in the second copy,
    /// which every window holds once capped
    fn rebase_shift(&self, target: f64) -> f64 {
        let len = self.dataset.original_len();
        let cycles = (page_at(target, self.item_width) / len).saturating_sub(1);
        (cycles * len) as f64 * self.item_width
    }
}

#[inline]
fn sanitize(offset: f64) -> f64 {
    if offset.is_finite() {
        offset.max(0.0)
    } else {
        0.0
    }
}
