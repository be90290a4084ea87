use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use newsreel_core::{
    carousel::AutoplayTick,
    news::{self, ArticleSource, NewsClient},
    storage::{BookmarkRepository, Database},
    AppConfig,
};
use newsreel_tui::{
    app::App,
    event::{AppEvent, EventHandler, FetchResult},
    input::{handle_key_event, handle_mouse_event, Action},
    widgets::{ArticleListWidget, BreakingNewsWidget, PaginationWidget, StatusBarWidget},
    Theme,
};

/// Rows of the breaking news section, borders included
const CAROUSEL_HEIGHT: u16 = 9;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: Arc<AppConfig>, db: Arc<Database>, category: Option<String>) -> Result<()> {
    let client: Arc<dyn ArticleSource> = Arc::new(NewsClient::new(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Newsreel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Autoplay ticks from the carousel timer
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<AutoplayTick>();

    let mut app = App::new(config.clone(), Theme::default(), tick_tx);
    app.category = category;

    let result = run_loop(&mut terminal, &mut app, &db, client, &mut tick_rx).await;

    // Stop autoplay before handing the terminal back
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    db: &Database,
    client: Arc<dyn ArticleSource>,
    tick_rx: &mut mpsc::UnboundedReceiver<AutoplayTick>,
) -> Result<()> {
    // Create channel for async fetch results
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();

    // Load bookmarks, then fetch everything in the background
    let ids = BookmarkRepository::new(db).list().await?;
    app.bookmarks = ids.iter().cloned().collect();
    spawn_feed_fetch(app, client.clone(), fetch_tx.clone());
    spawn_saved_fetch(ids, client.clone(), fetch_tx.clone());

    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);

    let mut spinner_frame = 0usize;
    // Checked at the END of each iteration to pick the NEXT iteration's poll rate
    let mut needs_fast_update = false;

    loop {
        // Process any completed fetches (non-blocking)
        while let Ok(result) = fetch_rx.try_recv() {
            handle_fetch_result(app, result);
        }

        // Apply queued autoplay ticks, then advance the surface
        let now = Instant::now();
        while let Ok(tick) = tick_rx.try_recv() {
            app.handle_tick(tick, now);
        }
        app.update_animation(now);

        // Draw UI
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(CAROUSEL_HEIGHT), // Breaking news
                    Constraint::Length(1),               // Pagination
                    Constraint::Min(3),                  // Headlines / Saved
                    Constraint::Length(1),               // Status bar
                ])
                .split(frame.area());

            BreakingNewsWidget::render(frame, layout[0], app);
            PaginationWidget::render(frame, layout[1], app);
            ArticleListWidget::render(frame, layout[2], app);
            StatusBarWidget::render(frame, layout[3], app, spinner_frame);
        })?;

        // Handle events (faster polling while the carousel is moving)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(app, action, db, &client, &fetch_tx).await;
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app);
                    handle_action(app, action, db, &client, &fetch_tx).await;
                }
                AppEvent::Resize(_, _) => {
                    // Page geometry is logical; the next draw picks up the new size
                }
                AppEvent::Tick => {
                    if app.is_loading {
                        spinner_frame = spinner_frame.wrapping_add(1);
                    }
                }
            }
        }

        needs_fast_update = app.needs_animation_frame();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_action(
    app: &mut App,
    action: Action,
    db: &Database,
    client: &Arc<dyn ArticleSource>,
    fetch_tx: &mpsc::UnboundedSender<FetchResult>,
) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::NextSlide => app.swipe(1, Instant::now()),
        Action::PrevSlide => app.swipe(-1, Instant::now()),
        Action::MoveDown => app.move_selection(1),
        Action::MoveUp => app.move_selection(-1),
        Action::JumpToTop => app.move_selection(i32::MIN),
        Action::JumpToBottom => app.move_selection(i32::MAX),
        Action::CycleFocus => app.cycle_focus(),
        Action::ToggleBookmark => toggle_bookmark(app, db).await,
        Action::OpenInBrowser => open_selected(app),
        Action::Refresh => {
            if !app.is_loading {
                spawn_feed_fetch(app, client.clone(), fetch_tx.clone());
            }
        }
        Action::ClearStatus => app.clear_status(),
        Action::DragStart { column, row } => {
            app.begin_drag(column, row);
        }
        Action::DragMove { column } => app.drag_to(column),
        Action::DragEnd => app.end_drag(Instant::now()),
        Action::None => {}
    }
}

async fn toggle_bookmark(app: &mut App, db: &Database) {
    let Some(article) = app.selected_article().cloned() else {
        app.set_status("Nothing selected");
        return;
    };

    match BookmarkRepository::new(db).toggle(&article.id).await {
        Ok(bookmarked) => app.apply_bookmark(&article, bookmarked),
        Err(e) => {
            tracing::warn!("Failed to update bookmark {}: {}", article.id, e);
            app.set_status(format!("Bookmark failed: {}", e));
        }
    }
}

fn open_selected(app: &mut App) {
    let Some(link) = app.selected_article().and_then(|a| a.link.clone()) else {
        app.set_status("No link for this article");
        return;
    };

    if let Err(e) = open::that(&link) {
        tracing::warn!("Failed to open {}: {}", link, e);
        app.set_status(format!("Failed to open browser: {}", e));
    }
}

/// Fetch breaking news and headlines concurrently
fn spawn_feed_fetch(
    app: &mut App,
    client: Arc<dyn ArticleSource>,
    tx: mpsc::UnboundedSender<FetchResult>,
) {
    app.is_loading = true;
    let api = app.config.api.clone();
    let category = app.category.clone();

    tokio::spawn(async move {
        let (breaking, headlines) = tokio::join!(
            news::breaking_news(client.as_ref(), &api),
            news::headlines(client.as_ref(), &api, category.as_deref()),
        );

        let result = match (breaking, headlines) {
            (Ok(breaking), Ok(headlines)) => FetchResult::Feed {
                breaking,
                headlines,
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("News fetch failed: {}", e);
                FetchResult::Failure {
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(result);
    });
}

/// Resolve bookmarked ids to articles for the Saved tab
fn spawn_saved_fetch(
    ids: Vec<String>,
    client: Arc<dyn ArticleSource>,
    tx: mpsc::UnboundedSender<FetchResult>,
) {
    if ids.is_empty() {
        return;
    }

    tokio::spawn(async move {
        let result = match news::lookup_ids(client.as_ref(), &ids).await {
            Ok(articles) => FetchResult::Saved(articles),
            Err(e) => {
                tracing::warn!("Saved articles lookup failed: {}", e);
                FetchResult::Failure {
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(result);
    });
}

fn handle_fetch_result(app: &mut App, result: FetchResult) {
    match result {
        FetchResult::Feed {
            breaking,
            headlines,
        } => {
            app.is_loading = false;
            app.mount_breaking(breaking);
            app.set_headlines(headlines);
        }
        FetchResult::Saved(articles) => {
            app.set_saved(articles);
        }
        FetchResult::Failure { error } => {
            app.is_loading = false;
            app.set_status(format!("Fetch failed: {}", error));
        }
    }
}
