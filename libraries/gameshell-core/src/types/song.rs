/// Background music track
use serde::{Deserialize, Serialize};

/// A playable background-music track
///
/// Songs are defined once in a static catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    /// Display title
    pub title: String,

    /// Asset filename, relative to the music asset directory
    pub filename: String,
}

impl Song {
    /// Create a new song
    pub fn new(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
        }
    }
}

impl std::fmt::Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.filename)
    }
}
