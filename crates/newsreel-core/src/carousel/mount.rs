//! L2 Organism Layer: A mounted breaking news carousel
//!
//! Bundles the controller, its render models and the autoplay timer so a
//! host has one thing to create and one thing to drop.

use std::time::Duration;

use tokio::sync::mpsc;

use super::autoplay::{AutoplayTick, AutoplayTimer};
use super::controller::{CarouselController, ScrollCommand};
use super::pagination::PaginationIndicator;
use super::slide::SlideRenderer;
use super::CarouselError;
use crate::config::CarouselConfig;
use crate::news::Article;

#[derive(Debug)]
pub struct Carousel {
    controller: CarouselController,
    slides: SlideRenderer,
    pagination: PaginationIndicator,
    timer: Option<AutoplayTimer>,
    ticks: mpsc::UnboundedSender<AutoplayTick>,
    period: Duration,
}

impl Carousel {
    /// Mount over `articles` and start autoplay.
    ///
    /// Ticks are delivered on `ticks`; pass each one back to
    /// [`Carousel::handle_tick`]. Must be called inside a tokio runtime.
    pub fn mount(
        articles: Vec<Article>,
        item_width: f64,
        config: &CarouselConfig,
        ticks: mpsc::UnboundedSender<AutoplayTick>,
    ) -> Result<Self, CarouselError> {
        let controller = CarouselController::initialize(articles, item_width, config)?;
        let slides = SlideRenderer::new(controller.subscribe(), item_width);
        let pagination = PaginationIndicator::new(
            controller.subscribe(),
            item_width,
            controller.dataset().original_len(),
        );

        let period = Duration::from_millis(config.autoplay_interval_ms);
        // A single article never advances, so it never needs a timer
        let timer = (!controller.is_degenerate())
            .then(|| AutoplayTimer::start(period, ticks.clone()));

        Ok(Self {
            controller,
            slides,
            pagination,
            timer,
            ticks,
            period,
        })
    }

    /// User started dragging: autoplay stops until the drag ends
    pub fn on_drag_start(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.controller.on_drag_start();
    }

    /// User released at `final_offset`; autoplay restarts with a full period
    /// before its next tick
    pub fn on_drag_end(&mut self, final_offset: f64) {
        self.controller.on_drag_end(final_offset);
        if !self.is_mounted() || self.controller.is_degenerate() {
            return;
        }
        self.timer = Some(AutoplayTimer::start(self.period, self.ticks.clone()));
    }

    /// Apply a tick if it belongs to this mount's live timer
    pub fn handle_tick(&mut self, tick: AutoplayTick) -> Option<ScrollCommand> {
        match &self.timer {
            Some(timer) if timer.owns(&tick) => self.controller.on_autoplay_tick(),
            _ => {
                tracing::debug!(generation = tick.generation, "Dropping stale autoplay tick");
                None
            }
        }
    }

    pub fn controller(&self) -> &CarouselController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CarouselController {
        &mut self.controller
    }

    pub fn slides(&self) -> &SlideRenderer {
        &self.slides
    }

    pub fn pagination(&self) -> &PaginationIndicator {
        &self.pagination
    }

    /// Stop autoplay and release the controller
    pub fn unmount(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.controller.teardown();
    }

    pub fn is_mounted(&self) -> bool {
        !self.controller.is_released()
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::testing::article;

    fn articles(n: usize) -> Vec<Article> {
        (0..n).map(|i| article(&i.to_string())).collect()
    }

    fn config(interval_ms: u64) -> CarouselConfig {
        CarouselConfig {
            autoplay_interval_ms: interval_ms,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_drives_controller() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::mount(articles(3), 100.0, &config(1000), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let tick = rx.try_recv().unwrap();
        let cmd = carousel.handle_tick(tick).unwrap();
        assert_eq!(cmd.target, 100.0);
        carousel.controller_mut().on_scroll_position_changed(cmd.target);

        assert_eq!(carousel.controller().active_index(), 1);
        assert_eq!(carousel.pagination().active_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_pauses_autoplay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::mount(articles(3), 100.0, &config(1000), tx).unwrap();

        carousel.on_drag_start();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        while let Ok(tick) = rx.try_recv() {
            assert!(carousel.handle_tick(tick).is_none());
        }
        assert_eq!(carousel.controller().offset(), 0.0);

        carousel.on_drag_end(200.0);
        tokio::time::sleep(Duration::from_millis(1001)).await;
        let cmd = carousel.handle_tick(rx.try_recv().unwrap()).unwrap();
        assert_eq!(cmd.target, 300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_restarts_full_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::mount(articles(3), 100.0, &config(5000), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        carousel.on_drag_start();
        tokio::time::sleep(Duration::from_millis(3950)).await;
        carousel.on_drag_end(200.0);

        // Where the old phase would have ticked
        tokio::time::sleep(Duration::from_millis(100)).await;
        while let Ok(tick) = rx.try_recv() {
            assert!(carousel.handle_tick(tick).is_none());
        }

        tokio::time::sleep(Duration::from_millis(4850)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(100)).await;
        let cmd = carousel.handle_tick(rx.try_recv().unwrap()).unwrap();
        assert_eq!(cmd.target, 300.0);
        assert_eq!(carousel.controller().offset(), 300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_after_unmount_stays_stopped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::mount(articles(3), 100.0, &config(100), tx).unwrap();

        carousel.on_drag_start();
        carousel.unmount();
        carousel.on_drag_end(100.0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_after_unmount() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::mount(articles(3), 100.0, &config(1000), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let queued = rx.try_recv().unwrap();

        carousel.unmount();
        assert!(!carousel.is_mounted());
        assert!(carousel.handle_tick(queued).is_none());
        assert_eq!(carousel.controller().offset(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_from_other_mount_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first = Carousel::mount(articles(3), 100.0, &config(1000), tx.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(1001)).await;
        let old_tick = rx.try_recv().unwrap();
        drop(first);

        let mut second = Carousel::mount(articles(3), 100.0, &config(1000), tx).unwrap();
        assert!(second.handle_tick(old_tick).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_article_has_no_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let carousel = Carousel::mount(articles(1), 100.0, &config(100), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(carousel.pagination().dots().count(), 1);
    }

    #[tokio::test]
    async fn test_mount_rejects_empty() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = Carousel::mount(Vec::new(), 100.0, &config(1000), tx).unwrap_err();
        assert_eq!(err, CarouselError::EmptyDataset);
    }
}
