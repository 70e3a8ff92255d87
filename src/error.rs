//! Error types for Tilde
//!
//! Uses `thiserror` for library errors; callbacks and the binary use `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Tilde operations
pub type TildeResult<T> = Result<T, TildeError>;

/// Main error type for Tilde operations
#[derive(Error, Debug)]
pub enum TildeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system watch subscription failed
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Invalid ignore pattern in the watch configuration
    #[error("invalid ignore pattern '{pattern}': {message}")]
    IgnorePattern { pattern: String, message: String },

    /// All signal sources feeding the watch loop have gone away
    #[error("signal channel closed while waiting for the next action")]
    ChannelClosed,

    /// A watch callback panicked instead of returning
    #[error("watch callback panicked: {message}")]
    CallbackPanicked { message: String },
}
