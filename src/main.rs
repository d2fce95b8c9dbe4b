//! peruse - a terminal file browser with preview, search, sorting and a shell prompt

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event};

mod config;
mod errors;
mod fs;
mod git;
mod input;
mod listing;
mod logging;
mod preview;
mod shell;
mod state;
mod terminal;
mod ui;
mod utils;

use config::Config;
use errors::AppResult;
use state::App;
use terminal::{Tui, install_signal_handlers, interrupted, restore_terminal, setup_panic_hook, setup_terminal};

/// How long to wait for input before checking for interrupts again
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main event loop
fn run(terminal: &mut Tui, app: &mut App) -> AppResult<()> {
    loop {
        app.refresh();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if interrupted() {
            tracing::info!("Interrupted, shutting down");
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> AppResult<()> {
    logging::init();
    let config = Config::load();
    let cwd = std::env::current_dir().unwrap_or_else(|e| {
        tracing::warn!("Cannot determine working directory: {}", e);
        PathBuf::from("/")
    });

    setup_panic_hook();
    install_signal_handlers();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config, cwd);

    let result = run(&mut terminal, &mut app);

    restore_terminal()?;
    match &result {
        Ok(()) => tracing::info!("Exiting"),
        Err(e) => tracing::error!("Exiting after error: {}", e),
    }
    result
}
