/// Core error types for Game Shell
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `ShellError`
pub type Result<T> = std::result::Result<T, ShellError>;

/// Core error type for Game Shell
#[derive(Error, Debug)]
pub enum ShellError {
    /// Audio backend errors (source loading, playback transitions)
    #[error("Audio error: {0}")]
    Audio(String),

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation exceeded its time bound
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ShellError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
