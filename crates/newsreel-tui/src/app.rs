use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use newsreel_core::carousel::{AutoplayTick, Carousel, CarouselError};
use newsreel_core::news::Article;
use newsreel_core::AppConfig;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::scroll::SurfaceAnimator;
use crate::theme::Theme;

/// Logical width of one carousel page; mapped to columns when drawing
pub const PAGE_WIDTH: f64 = 100.0;

/// Section that receives list navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Breaking,
    Headlines,
    Saved,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Breaking => Focus::Headlines,
            Focus::Headlines => Focus::Saved,
            Focus::Saved => Focus::Breaking,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Breaking => "Breaking",
            Focus::Headlines => "Headlines",
            Focus::Saved => "Saved",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    last_column: u16,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Mounted breaking news carousel, if there was anything to show
    pub carousel: Option<Carousel>,
    /// The carousel's scroll surface
    pub animator: SurfaceAnimator,
    pub headlines: Vec<Article>,
    pub saved: Vec<Article>,
    /// Bookmarked article ids
    pub bookmarks: HashSet<String>,
    pub focus: Focus,
    pub selected_headline: usize,
    pub selected_saved: usize,
    /// Category filter for the headline list
    pub category: Option<String>,
    pub status_message: Option<String>,
    pub is_loading: bool,
    pub should_quit: bool,
    /// Screen area of the carousel from the last draw, for mouse hit tests
    pub carousel_area: Rect,
    drag: Option<Drag>,
    ticks: mpsc::UnboundedSender<AutoplayTick>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        theme: Theme,
        ticks: mpsc::UnboundedSender<AutoplayTick>,
    ) -> Self {
        let animator = SurfaceAnimator::new(&config.carousel);
        Self {
            config,
            theme,
            carousel: None,
            animator,
            headlines: Vec::new(),
            saved: Vec::new(),
            bookmarks: HashSet::new(),
            focus: Focus::Breaking,
            selected_headline: 0,
            selected_saved: 0,
            category: None,
            status_message: None,
            is_loading: false,
            should_quit: false,
            carousel_area: Rect::default(),
            drag: None,
            ticks,
        }
    }

    /// Replace the carousel with one over `articles`; the old mount (and its
    /// timer) is released first. Must be called inside a tokio runtime.
    pub fn mount_breaking(&mut self, articles: Vec<Article>) {
        if let Some(mut old) = self.carousel.take() {
            old.unmount();
        }
        self.drag = None;
        self.animator = SurfaceAnimator::new(&self.config.carousel);

        match Carousel::mount(articles, PAGE_WIDTH, &self.config.carousel, self.ticks.clone()) {
            Ok(carousel) => {
                tracing::info!(
                    articles = carousel.controller().dataset().original_len(),
                    "Mounted breaking news carousel"
                );
                self.carousel = Some(carousel);
            }
            Err(CarouselError::EmptyDataset) => {
                tracing::info!("No breaking news to show");
            }
            Err(e) => {
                tracing::warn!("Failed to mount carousel: {}", e);
                self.set_status(format!("Carousel error: {}", e));
            }
        }
    }

    /// Forward an autoplay tick; the carousel decides whether it counts
    pub fn handle_tick(&mut self, tick: AutoplayTick, now: Instant) {
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        if let Some(command) = carousel.handle_tick(tick) {
            self.animator.apply(command, now);
        }
    }

    /// Advance the surface and report what moved back to the controller
    pub fn update_animation(&mut self, now: Instant) {
        let position = self.animator.update(now);
        let settled = self.animator.take_settled();

        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let controller = carousel.controller_mut();
        if let Some(position) = position {
            controller.on_scroll_position_changed(position);
        }
        if let Some(offset) = settled {
            controller.on_momentum_end(offset);
        }
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_animation_frame(&self) -> bool {
        self.carousel.is_some() && (self.animator.needs_update() || self.drag.is_some())
    }

    /// Page forward (`1`) or back (`-1`) as if swiped
    pub fn swipe(&mut self, direction: i32, now: Instant) {
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let page = (self.animator.target() / PAGE_WIDTH).round() + direction.signum() as f64;
        let target = page.max(0.0) * PAGE_WIDTH;

        carousel.on_drag_start();
        carousel.on_drag_end(target);
        self.animator.animate_to(target, now);
    }

    /// Mouse button went down; starts a drag when it hit the carousel
    pub fn begin_drag(&mut self, column: u16, row: u16) -> bool {
        let area = self.carousel_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        let Some(carousel) = self.carousel.as_mut().filter(|_| inside) else {
            return false;
        };

        self.animator.cancel();
        carousel.on_drag_start();
        self.drag = Some(Drag {
            last_column: column,
        });
        true
    }

    /// Pointer moved while dragging; content follows the pointer
    pub fn drag_to(&mut self, column: u16) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let width = self.carousel_area.width.max(1) as f64;
        let delta = (drag.last_column as f64 - column as f64) * PAGE_WIDTH / width;
        drag.last_column = column;
        self.animator.jump_to(self.animator.position() + delta);
    }

    /// Pointer released; the surface settles on the nearest page
    pub fn end_drag(&mut self, now: Instant) {
        if self.drag.take().is_none() {
            return;
        }
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let target = (self.animator.position() / PAGE_WIDTH).round().max(0.0) * PAGE_WIDTH;
        carousel.on_drag_end(target);
        self.animator.settle_to(target, now);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Article shown at the carousel's current page
    pub fn breaking_article(&self) -> Option<&Article> {
        let carousel = self.carousel.as_ref()?;
        let index = carousel.pagination().active_index();
        carousel.controller().dataset().originals().get(index)
    }

    /// Article the next action applies to
    pub fn selected_article(&self) -> Option<&Article> {
        match self.focus {
            Focus::Breaking => self.breaking_article(),
            Focus::Headlines => self.headlines.get(self.selected_headline),
            Focus::Saved => self.saved.get(self.selected_saved),
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        let (len, selected) = match self.focus {
            Focus::Breaking => return,
            Focus::Headlines => (self.headlines.len(), &mut self.selected_headline),
            Focus::Saved => (self.saved.len(), &mut self.selected_saved),
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let next = (*selected as i64 + delta as i64).clamp(0, len as i64 - 1);
        *selected = next as usize;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn set_headlines(&mut self, articles: Vec<Article>) {
        self.headlines = articles;
        self.selected_headline = self
            .selected_headline
            .min(self.headlines.len().saturating_sub(1));
    }

    pub fn set_saved(&mut self, articles: Vec<Article>) {
        self.saved = articles;
        self.selected_saved = self.selected_saved.min(self.saved.len().saturating_sub(1));
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    /// Mirror a stored bookmark change into the in-memory lists
    pub fn apply_bookmark(&mut self, article: &Article, bookmarked: bool) {
        if bookmarked {
            self.bookmarks.insert(article.id.clone());
            if !self.saved.iter().any(|a| a.id == article.id) {
                self.saved.push(article.clone());
            }
            self.set_status(format!("Saved: {}", article.title));
        } else {
            self.bookmarks.remove(&article.id);
            self.saved.retain(|a| a.id != article.id);
            self.selected_saved = self.selected_saved.min(self.saved.len().saturating_sub(1));
            self.set_status(format!("Removed: {}", article.title));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Release the carousel before the terminal is restored
    pub fn shutdown(&mut self) {
        if let Some(mut carousel) = self.carousel.take() {
            carousel.unmount();
        }
    }
}
