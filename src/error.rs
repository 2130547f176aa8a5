//! Crate-wide error type.
//!
//! Nothing inside a frame can fail: layout overflow, cache misses, skipped
//! cache stores and out-of-range rows are all absorbed where they happen.
//! Errors only come from the edges: the terminal, configuration and logging.

use crate::logging::LoggingError;

/// Errors surfaced by the application layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal I/O failed (raw mode, alternate screen, writes, event reads).
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An [`AppConfig`](crate::app::AppConfig) value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The tracing subscriber could not be installed.
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
