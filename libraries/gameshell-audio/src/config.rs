//! Configuration for the audio controller

use serde::{Deserialize, Serialize};

/// Configuration for [`AudioController`](crate::AudioController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Number of sound effect channels (default: 2)
    #[serde(default = "default_polyphony")]
    pub polyphony: usize,

    /// Shuffle the song catalog once at startup (default: true)
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,

    /// Asset path prefix for music files (default: "music/")
    #[serde(default = "default_music_prefix")]
    pub music_prefix: String,

    /// Asset path prefix for sound effect files (default: "sfx/")
    #[serde(default = "default_sfx_prefix")]
    pub sfx_prefix: String,
}

fn default_polyphony() -> usize {
    2
}

fn default_shuffle() -> bool {
    true
}

fn default_music_prefix() -> String {
    "music/".to_string()
}

fn default_sfx_prefix() -> String {
    "sfx/".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            polyphony: default_polyphony(),
            shuffle: default_shuffle(),
            music_prefix: default_music_prefix(),
            sfx_prefix: default_sfx_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AudioConfig::default();
        assert_eq!(config.polyphony, 2);
        assert!(config.shuffle);
        assert_eq!(config.music_prefix, "music/");
        assert_eq!(config.sfx_prefix, "sfx/");
    }
}
