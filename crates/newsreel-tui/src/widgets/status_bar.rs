use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use newsreel_core::carousel::AutoplayState;

use crate::app::App;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let carousel = match app.carousel.as_ref() {
                Some(c) => {
                    let play = match c.controller().state() {
                        AutoplayState::Playing if !c.controller().is_degenerate() => "▶",
                        _ => "⏸",
                    };
                    format!(
                        "{} {}/{}",
                        play,
                        c.pagination().active_index() + 1,
                        c.pagination().len()
                    )
                }
                None => "-".to_string(),
            };
            let loading = if app.is_loading {
                format!(" {} loading", SPINNER[spinner_frame % SPINNER.len()])
            } else {
                String::new()
            };
            format!(
                " {} | {} | Headlines: {} | Saved: {}{}",
                app.focus.label(),
                carousel,
                app.headlines.len(),
                app.saved.len(),
                loading
            )
        };

        let help_hint = " q:quit [/]:swipe Tab:section b:save o:open r:refresh ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
