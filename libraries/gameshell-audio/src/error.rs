//! Error types for audio orchestration

use thiserror::Error;

/// Audio controller errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// Polyphony must allow at least one sound effect channel
    #[error("Invalid polyphony: {0}. At least one sound effect channel is required")]
    InvalidPolyphony(usize),

    /// The controller spawns its sequencer on the ambient tokio runtime
    #[error("Audio controller must be created inside a tokio runtime")]
    NoRuntime,
}

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;
