use thiserror::Error;

/// Errors that can cross the adapter boundary (terminal, configuration).
/// Core browsing operations never return these; they degrade to empty results.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type AppResult<T> = Result<T, AppError>;
