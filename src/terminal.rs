//! Terminal lifecycle and interrupt handling

use std::io::{self, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::errors::{AppError, AppResult};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Set by SIGINT / SIGTERM; polled by the main loop
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Set up panic hook to restore terminal on panic
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Initialize the terminal for TUI mode
pub fn setup_terminal() -> AppResult<Tui> {
    enable_raw_mode().map_err(|e| AppError::Terminal(format!("cannot enable raw mode: {}", e)))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore terminal to normal mode
pub fn restore_terminal() -> AppResult<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(unix)]
extern "C" fn on_signal(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM to the interrupt flag
#[cfg(unix)]
pub fn install_signal_handlers() {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: the handler only performs an atomic store
        if unsafe { libc::signal(signal, handler) } == libc::SIG_ERR {
            tracing::warn!("Could not install handler for signal {}", signal);
        }
    }
}

#[cfg(not(unix))]
pub fn install_signal_handlers() {}

/// Whether an interrupt signal has arrived
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
