//! Error types shared across logseed crates

use thiserror::Error;

/// Result type alias for shared logseed operations
pub type Result<T> = std::result::Result<T, LogseedError>;

/// Error type for shared utilities
#[derive(Error, Debug)]
pub enum LogseedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl LogseedError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
