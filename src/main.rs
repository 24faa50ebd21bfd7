use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use taskdesk_tui::{
    app::{update, AppState, Screen},
    config::{Cli, Config, StartScreen},
    effects::{Delivery, EffectRunner, NotificationListener},
    event::AppEvent,
    logging,
    paths::Paths,
    storage::FileTokenStore,
    transport::HttpBackend,
    view::render,
};
use tokio::sync::mpsc;

/// Redraw interval for clocks and relative times.
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = Paths::platform()?;
    let config = Config::load(&cli, &paths)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(&config.log_dir, &config.log_level)?;
    tracing::info!(api_url = %config.api_url, ws_url = %config.ws_url, "starting taskdesk");

    let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout)?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (listener, mut notification_rx) =
        NotificationListener::new(config.ws_url.clone(), config.notifications.clone());
    let mut runner = EffectRunner::new(
        Arc::new(backend),
        Box::new(FileTokenStore::new(&config.token_file)),
        event_tx,
        listener,
    );

    let mut state = AppState::with_screen(initial_screen(config.start_screen))
        .with_notification_capacity(config.notifications.queue_capacity);

    if let Some(token) = runner.restore_token() {
        let effects = update(&mut state, AppEvent::TokenRestored(token));
        runner.run_all(effects);
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_event_loop(
        &mut terminal,
        &mut state,
        &mut runner,
        &mut event_rx,
        &mut notification_rx,
    )
    .await;

    // Terminal cleanup (always execute even if event loop errored)
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdesk exiting");
    result
}

fn initial_screen(start: StartScreen) -> Screen {
    match start {
        StartScreen::Tasks => Screen::Tasks,
        StartScreen::Chat => Screen::Chat,
    }
}

/// Main event loop following Elm Architecture.
/// Every input (keys, backend results, notifications, ticks) becomes an
/// `AppEvent`; the effects `update` returns go to the runner.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    runner: &mut EffectRunner,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
    notifications: &mut mpsc::Receiver<Delivery>,
) -> Result<()> {
    let mut keys = EventStream::new();
    let mut ticks = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|frame| render(state, frame))?;

        let event = tokio::select! {
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                // Resize and other terminal events only need a redraw
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = events.recv() => event,
            Some(delivery) = notifications.recv() => AppEvent::NotificationReceived {
                user_id: delivery.user_id,
                text: delivery.text,
            },
            _ = ticks.tick() => AppEvent::Tick(Utc::now()),
        };

        let effects = update(state, event);
        runner.run_all(effects);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
