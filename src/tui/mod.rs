//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

pub use app::App;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the interactive board until the user quits.
///
/// The terminal is restored even when setup or the loop fails.
#[instrument(skip_all)]
pub async fn run_tui(mut app: App) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let res = run_in_alternate_screen(&mut app).await;
    restore_terminal(&mut io::stdout(), disable_raw_mode);

    if let Err(err) = &res {
        error!(error = ?err, "Terminal UI failed");
    }
    info!("Terminal UI stopped");
    res
}

async fn run_in_alternate_screen(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    run_loop(&mut terminal, app).await
}

/// Leaves raw mode and the alternate screen and shows the cursor.
///
/// Every step runs; failures are logged, not returned.
fn restore_terminal<W: Write>(out: &mut W, disable_raw: impl FnOnce() -> io::Result<()>) {
    if let Err(e) = disable_raw() {
        error!(error = %e, "Could not leave raw mode");
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen, Show) {
        error!(error = %e, "Could not leave alternate screen");
    }
}

/// Redraws whenever the game or connectivity changes, or a key arrives.
async fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut dirty = true;

    while !app.should_quit() {
        if app.take_changes() {
            dirty = true;
        }
        if dirty {
            terminal.draw(|frame| ui::draw(frame, app))?;
            dirty = false;
        }

        let event = tokio::task::block_in_place(|| -> io::Result<Option<Event>> {
            if event::poll(INPUT_POLL)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;

        match event {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                app.handle_key(key.code);
                dirty = true;
            }
            Some(Event::Resize(_, _)) => dirty = true,
            _ => {}
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
