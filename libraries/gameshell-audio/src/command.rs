//! Music player commands

/// One requested transition of the background music player
///
/// Commands are executed strictly in submission order by the
/// [`MusicSequencer`](crate::MusicSequencer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicCommand {
    /// Load the asset and start playing it
    Play(String),

    /// Pause playback
    Pause,

    /// Resume paused playback
    Resume,
}

impl std::fmt::Display for MusicCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Play(asset) => write!(f, "play({asset})"),
            Self::Pause => write!(f, "pause"),
            Self::Resume => write!(f, "resume"),
        }
    }
}
