/// Coarse playback state reported by an audio backend
use serde::{Deserialize, Serialize};

/// Last known state of a backend player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Never started, or stopped explicitly
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-source
    Paused,

    /// Reached the end of the source
    Completed,

    /// Resources released; the player can no longer be used
    Disposed,
}

impl PlayerState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Disposed => "disposed",
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
