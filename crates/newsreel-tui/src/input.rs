use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Focus};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Swipe the carousel one page forward
    NextSlide,
    /// Swipe the carousel one page back
    PrevSlide,
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    CycleFocus,
    ToggleBookmark,
    OpenInBrowser,
    Refresh,
    ClearStatus,
    DragStart { column: u16, row: u16 },
    DragMove { column: u16 },
    DragEnd,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Carousel paging
        (KeyCode::Char(']'), _) => Action::NextSlide,
        (KeyCode::Char('['), _) => Action::PrevSlide,
        (KeyCode::Right | KeyCode::Char('l'), KeyModifiers::NONE)
            if app.focus == Focus::Breaking =>
        {
            Action::NextSlide
        }
        (KeyCode::Left | KeyCode::Char('h'), KeyModifiers::NONE)
            if app.focus == Focus::Breaking =>
        {
            Action::PrevSlide
        }

        // List navigation
        (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Char('G'), _) => Action::JumpToBottom,

        (KeyCode::Tab, _) => Action::CycleFocus,
        (KeyCode::Char('b'), KeyModifiers::NONE) => Action::ToggleBookmark,
        (KeyCode::Char('o') | KeyCode::Enter, KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,
        (KeyCode::Esc, _) => Action::ClearStatus,

        _ => Action::None,
    }
}

/// Map left-button mouse events to carousel drag actions
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::DragStart {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Drag(MouseButton::Left) if app.is_dragging() => Action::DragMove {
            column: mouse.column,
        },
        MouseEventKind::Up(MouseButton::Left) if app.is_dragging() => Action::DragEnd,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};
    use newsreel_core::AppConfig;
    use tokio::sync::mpsc;

    use super::*;
    use crate::theme::Theme;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Arc::new(AppConfig::default()), Theme::default(), tx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrows_page_only_on_carousel() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Right), &app), Action::NextSlide);
        assert_eq!(handle_key_event(key(KeyCode::Left), &app), Action::PrevSlide);

        app.focus = Focus::Headlines;
        assert_eq!(handle_key_event(key(KeyCode::Right), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char(']')), &app), Action::NextSlide);
    }

    #[test]
    fn test_basic_bindings() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::CycleFocus);
        assert_eq!(handle_key_event(key(KeyCode::Char('b')), &app), Action::ToggleBookmark);
        assert_eq!(handle_key_event(key(KeyCode::Char('r')), &app), Action::Refresh);
    }

    #[test]
    fn test_mouse_drag_requires_press() {
        let app = app();
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left)), &app),
            Action::DragStart { column: 7, row: 3 }
        );
        // No drag in progress yet
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left)), &app),
            Action::None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left)), &app),
            Action::None
        );
    }
}
