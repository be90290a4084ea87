use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use newsreel_core::carousel::SlideFrame;

use crate::app::{App, Focus, PAGE_WIDTH};
use crate::theme::{blend, Theme};

pub struct BreakingNewsWidget;

impl BreakingNewsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &app.theme;
        let border_style = if app.focus == Focus::Breaking {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(Span::styled(
                " Breaking News ",
                Style::default()
                    .fg(theme.breaking)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.carousel_area = inner;

        let Some(carousel) = app.carousel.as_ref() else {
            let message = if app.is_loading {
                "Loading breaking news..."
            } else {
                "No breaking news right now"
            };
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(app.theme.grey1)),
                inner,
            );
            return;
        };

        let position = carousel.slides().position();
        let dataset = carousel.controller().dataset();
        for slide in carousel.slides().visible_frames(dataset) {
            let Some(rect) = slide_rect(inner, slide.index, position) else {
                continue;
            };
            let rect = inset(rect, slide.transform.scale);
            if rect.width < 4 || rect.height < 3 {
                continue;
            }
            let bookmarked = dataset
                .get(slide.index)
                .map(|a| app.bookmarks.contains(&a.id))
                .unwrap_or(false);
            render_slide(frame, rect, &slide, bookmarked, &app.theme);
        }
    }
}

fn render_slide(frame: &mut Frame, area: Rect, slide: &SlideFrame<'_>, bookmarked: bool, theme: &Theme) {
    let opacity = slide.transform.opacity;
    let text = blend(theme.fg1, theme.bg1, opacity);
    let muted = blend(theme.grey2, theme.bg1, opacity);

    let mut title = vec![Span::styled(
        slide.title,
        Style::default().fg(text).add_modifier(Modifier::BOLD),
    )];
    if bookmarked {
        title.insert(0, Span::styled("★ ", Style::default().fg(blend(theme.bookmark, theme.bg1, opacity))));
    }

    let mut lines = vec![Line::from(title), Line::raw("")];
    if let Some(url) = slide.image_url {
        lines.push(Line::from(Span::styled(
            format!("▣ {}", image_host(url)),
            Style::default().fg(muted),
        )));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", slide.source_name), Style::default().fg(muted)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(muted))
        .style(Style::default().bg(theme.bg1));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Screen rect of the slide at materialized `index`, clipped to `area`
pub(crate) fn slide_rect(area: Rect, index: usize, position: f64) -> Option<Rect> {
    let width = area.width as f64;
    let left = area.x as f64 + (index as f64 * PAGE_WIDTH - position) / PAGE_WIDTH * width;
    let right = left + width;

    let clip_left = left.max(area.x as f64).round();
    let clip_right = right.min(area.x as f64 + width).round();
    if clip_right <= clip_left {
        return None;
    }

    Some(Rect::new(
        clip_left as u16,
        area.y,
        (clip_right - clip_left) as u16,
        area.height,
    ))
}

/// Shrink `rect` around its centre by `scale`
pub(crate) fn inset(rect: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let dx = ((1.0 - scale) * rect.width as f64 / 2.0).round() as u16;
    let dy = ((1.0 - scale) * rect.height as f64 / 2.0).round() as u16;
    Rect::new(
        rect.x + dx,
        rect.y + dy,
        rect.width.saturating_sub(dx * 2),
        rect.height.saturating_sub(dy * 2),
    )
}

fn image_host(url: &str) -> &str {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 2,
        y: 1,
        width: 40,
        height: 10,
    };

    #[test]
    fn test_slide_centered_fills_area() {
        assert_eq!(slide_rect(AREA, 1, 100.0), Some(AREA));
    }

    #[test]
    fn test_slide_half_scrolled() {
        // Halfway between slide 0 and slide 1
        let left = slide_rect(AREA, 0, 50.0).unwrap();
        let right = slide_rect(AREA, 1, 50.0).unwrap();
        assert_eq!((left.x, left.width), (2, 20));
        assert_eq!((right.x, right.width), (22, 20));
        assert_eq!(slide_rect(AREA, 2, 50.0), None);
    }

    #[test]
    fn test_inset_by_scale() {
        let rect = Rect::new(0, 0, 40, 10);
        assert_eq!(inset(rect, 1.0), rect);
        assert_eq!(inset(rect, 0.8), Rect::new(4, 1, 32, 8));
    }

    #[test]
    fn test_image_host() {
        assert_eq!(image_host("https://img.example/a/b.jpg"), "img.example");
        assert_eq!(image_host("not a url"), "not a url");
    }
}
