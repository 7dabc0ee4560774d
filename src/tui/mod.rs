mod app;
mod event_handler;
mod preview;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::GeminiClient;
use crate::config::Config;
use app::App;

/// Run the TUI application, returning the paths of images saved during the session
pub async fn run(config: Config) -> Result<Vec<PathBuf>> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let generator = Arc::new(GeminiClient::from_config(&config));
    tracing::info!("Using model {}", generator.model());
    let mut app = App::new(config, generator);

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|_| app.saved_paths)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();
    let results = app.results();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    loop {
        // Draw UI
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    event_handler::handle_key(app, key).await;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => return Ok(()),
            },
            Ok(outcome) = results.recv() => app.apply_outcome(outcome),
            _ = ticker.tick() => app.on_tick(),
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}
