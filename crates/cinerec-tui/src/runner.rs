//! Interactive TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cinerec_api::backend::{RecommendApi, SearchRequest};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use crate::app::{App, AppAction, Message};
use crate::ui;

/// Idle sleep between polls; lets spawned requests make progress.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the interactive client until the user quits.
///
/// The marquee fetch starts immediately; each submit spawns one request
/// whose outcome is applied when it arrives.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event handling fails.
pub async fn run_app<A>(api: Arc<A>, marquee_tick: Duration) -> Result<()>
where
    A: RecommendApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new();

    let result = run_event_loop(&mut terminal, &mut app, &api, marquee_tick).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &Arc<A>,
    marquee_tick: Duration,
) -> Result<()>
where
    A: RecommendApi + Sync + 'static,
{
    let (tx, mut rx) = unbounded_channel();

    if app.marquee.begin_mount() {
        spawn_popular(api, tx.clone());
    }

    let mut last_tick = Instant::now();
    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        let event_ready = event::poll(Duration::ZERO).context("failed to poll events")?;
        if event_ready
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match app.handle_key(key.code, key.modifiers) {
                AppAction::Quit => return Ok(()),
                AppAction::Submit => {
                    if let Some(request) = app.panel.begin_submit() {
                        spawn_search(api, request, tx.clone());
                    }
                }
                AppAction::None => {}
            }
        }
        pause(event_ready).await;

        if last_tick.elapsed() >= marquee_tick {
            app.marquee.tick();
            last_tick = Instant::now();
        }
    }
}

/// Hands control back to the runtime once per loop iteration.
///
/// Yields when more input is pending, sleeps otherwise. Spawned requests
/// only progress while the loop is suspended here.
async fn pause(event_ready: bool) {
    if event_ready {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Sends one recommendation request in the background.
fn spawn_search<A>(api: &Arc<A>, request: SearchRequest, tx: UnboundedSender<Message>)
where
    A: RecommendApi + Sync + 'static,
{
    tracing::info!(mode = %request.mode, query = %request.query, "submitting search");
    let api = Arc::clone(api);
    tokio::spawn(async move {
        let outcome = api.recommend(&request).await;
        // The receiver is gone only after the user quit.
        let _ = tx.send(Message::Search(outcome));
    });
}

/// Fetches popular movies in the background.
fn spawn_popular<A>(api: &Arc<A>, tx: UnboundedSender<Message>)
where
    A: RecommendApi + Sync + 'static,
{
    let api = Arc::clone(api);
    tokio::spawn(async move {
        let outcome = api.popular_movies().await;
        let _ = tx.send(Message::Popular(outcome));
    });
}
