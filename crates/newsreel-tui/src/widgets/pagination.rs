use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::blend;

pub struct PaginationWidget;

impl PaginationWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let Some(carousel) = app.carousel.as_ref() else {
            return;
        };
        let theme = &app.theme;

        let mut spans = Vec::with_capacity(carousel.pagination().len() * 2);
        for dot in carousel.pagination().dots() {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            let mut style = Style::default().fg(blend(
                theme.dot_active,
                theme.dot_inactive,
                dot.transform.opacity,
            ));
            if dot.active {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(dot_glyph(dot.transform.scale), style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

/// Terminal stand-in for a dot drawn at `scale`
pub(crate) fn dot_glyph(scale: f64) -> &'static str {
    if scale >= 1.2 {
        "●"
    } else if scale >= 1.0 {
        "•"
    } else {
        "·"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsreel_core::carousel::TransformRange;

    #[test]
    fn test_dot_glyph_follows_emphasis() {
        assert_eq!(dot_glyph(TransformRange::DOT.center.scale), "●");
        assert_eq!(dot_glyph(TransformRange::DOT.outer.scale), "·");
        assert_eq!(dot_glyph(1.1), "•");
    }
}
