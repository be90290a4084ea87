use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use chrono::NaiveDateTime;

use crate::app::{App, Focus};

pub struct ArticleListWidget;

impl ArticleListWidget {
    /// Render the headline list, or the saved list when that tab is focused
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let showing_saved = app.focus == Focus::Saved;
        let is_focused = app.focus != Focus::Breaking;

        let (articles, selected) = if showing_saved {
            (&app.saved, app.selected_saved)
        } else {
            (&app.headlines, app.selected_headline)
        };

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let title = if showing_saved {
            format!(" Saved ({}) ", articles.len())
        } else {
            match app.category.as_deref() {
                Some(category) => format!(" Headlines [{}] ", category),
                None => " Headlines ".to_string(),
            }
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        if articles.is_empty() {
            let empty = if showing_saved {
                "No saved articles. Press b on a story to save it."
            } else if app.is_loading {
                "Loading..."
            } else {
                "No headlines"
            };
            let item = ListItem::new(Line::from(Span::styled(
                empty,
                Style::default().fg(theme.grey1),
            )));
            frame.render_widget(List::new(vec![item]).block(block), area);
            return;
        }

        let items: Vec<ListItem> = articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let saved_marker = if app.is_bookmarked(&article.id) { "★" } else { " " };

                let title_style = if i == selected && is_focused {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg1)
                };

                let mut spans = vec![
                    Span::styled(saved_marker, Style::default().fg(theme.bookmark)),
                    Span::raw(" "),
                    Span::styled(article.title.clone(), title_style),
                ];
                let source = article.source_label();
                if !source.is_empty() {
                    spans.push(Span::styled(
                        format!("  · {}", source),
                        Style::default().fg(theme.grey1),
                    ));
                }
                if let Some(date) = article.pub_date.as_deref().and_then(format_pub_date) {
                    spans.push(Span::styled(
                        format!("  {}", date),
                        Style::default().fg(theme.grey0),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        if is_focused {
            state.select(Some(selected));
        }

        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Short display form of the API's `YYYY-MM-DD HH:MM:SS` timestamps
fn format_pub_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.format("%b %d %H:%M").to_string())
}
