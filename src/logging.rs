//! Tracing setup. Output goes to a file so it never draws over the interface.

use std::fs;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `PERUSE_LOG=debug`
pub const FILTER_ENV: &str = "PERUSE_LOG";
const LOG_FILE: &str = "peruse.log";

/// Directory the log file is written to
pub fn log_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(std::env::temp_dir)
        .join("peruse")
}

/// Call once near the start of `main`. Failing to set up logging is not fatal.
pub fn init() {
    let mut dir = log_dir();
    if fs::create_dir_all(&dir).is_err() {
        dir = std::env::temp_dir();
    }

    let Ok(file) = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&dir)
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry().with(file_layer).try_init().is_ok() {
        tracing::info!("peruse {} starting, logging to {}", env!("CARGO_PKG_VERSION"), dir.join(LOG_FILE).display());
    }
}
