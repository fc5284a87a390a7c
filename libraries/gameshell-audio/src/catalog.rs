//! Built-in song and sound effect catalogs

use gameshell_core::{SfxType, Song};
use std::collections::HashMap;

/// The built-in background music catalog
pub fn songs() -> Vec<Song> {
    vec![
        Song::new("Azul", "Mr_Smith-Azul.mp3"),
        Song::new("Sonorus", "Mr_Smith-Sonorus.mp3"),
        Song::new("Sunday Solitude", "Mr_Smith-Sunday_Solitude.mp3"),
    ]
}

/// Candidate files and playback volume for one sound effect type
#[derive(Debug, Clone, PartialEq)]
pub struct SfxEntry {
    /// Candidate filenames; one is picked at random per playback
    pub filenames: Vec<String>,

    /// Playback volume (0.0 - 1.0)
    pub volume: f32,
}

/// Mapping from sound effect type to its candidate files and volume
#[derive(Debug, Clone, Default)]
pub struct SfxCatalog {
    entries: HashMap<SfxType, SfxEntry>,
}

impl SfxCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog covering every [`SfxType`]
    pub fn builtin() -> Self {
        Self::new()
            .with(SfxType::ButtonTap, &["k1.mp3", "k2.mp3", "p1.mp3", "p2.mp3"], 1.0)
            .with(SfxType::Congrats, &["yay1.mp3", "wehee1.mp3", "oo1.mp3"], 1.0)
            .with(SfxType::Erase, &["fwfwfwfwfw1.mp3", "fwfwfwfw1.mp3"], 1.0)
            .with(SfxType::Huhsh, &["hash1.mp3", "hash2.mp3", "hash3.mp3"], 0.4)
            .with(SfxType::Jump, &["jump1.mp3", "jump2.mp3"], 0.7)
            .with(SfxType::SwishSwish, &["swishswish1.mp3"], 1.0)
            .with(SfxType::WrongAnswer, &["wrong1.mp3", "wrong2.mp3"], 0.8)
            .with(
                SfxType::Wssh,
                &[
                    "wssh1.mp3",
                    "wssh2.mp3",
                    "dsht1.mp3",
                    "ws1.mp3",
                    "spsh1.mp3",
                    "wehw1.mp3",
                    "wehw2.mp3",
                    "xylo1.mp3",
                ],
                0.2,
            )
    }

    /// Register (or replace) an entry
    ///
    /// Volumes are clamped to 0.0 - 1.0.
    #[must_use]
    pub fn with(mut self, sfx: SfxType, filenames: &[&str], volume: f32) -> Self {
        self.insert(sfx, filenames.iter().map(|f| (*f).to_string()).collect(), volume);
        self
    }

    /// Register (or replace) an entry in place
    pub fn insert(&mut self, sfx: SfxType, filenames: Vec<String>, volume: f32) {
        self.entries.insert(
            sfx,
            SfxEntry {
                filenames,
                volume: volume.clamp(0.0, 1.0),
            },
        );
    }

    /// Entry for a sound effect type, if registered
    pub fn entry(&self, sfx: SfxType) -> Option<&SfxEntry> {
        self.entries.get(&sfx)
    }

    /// Every registered filename, deduplicated and sorted
    pub fn filenames(&self) -> Vec<String> {
        let mut filenames: Vec<String> = self
            .entries
            .values()
            .flat_map(|entry| entry.filenames.iter().cloned())
            .collect();
        filenames.sort();
        filenames.dedup();
        filenames
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_type() {
        let catalog = SfxCatalog::builtin();
        for sfx in SfxType::ALL {
            let entry = catalog.entry(sfx).expect("missing entry");
            assert!(!entry.filenames.is_empty(), "{sfx} has no files");
            assert!((0.0..=1.0).contains(&entry.volume));
        }
    }

    #[test]
    fn builtin_volumes() {
        let catalog = SfxCatalog::builtin();
        assert_eq!(catalog.entry(SfxType::Huhsh).map(|e| e.volume), Some(0.4));
        assert_eq!(catalog.entry(SfxType::Wssh).map(|e| e.volume), Some(0.2));
        assert_eq!(catalog.entry(SfxType::ButtonTap).map(|e| e.volume), Some(1.0));
    }

    #[test]
    fn filenames_are_deduplicated() {
        let catalog = SfxCatalog::new()
            .with(SfxType::Jump, &["a.wav", "b.wav"], 0.5)
            .with(SfxType::Erase, &["b.wav"], 0.5);

        assert_eq!(catalog.filenames(), vec!["a.wav", "b.wav"]);
    }

    #[test]
    fn volume_is_clamped() {
        let catalog = SfxCatalog::new().with(SfxType::Jump, &["a.wav"], 3.0);
        assert_eq!(catalog.entry(SfxType::Jump).map(|e| e.volume), Some(1.0));
    }

    #[test]
    fn builtin_song_catalog_is_unique() {
        let songs = songs();
        let mut filenames: Vec<_> = songs.iter().map(|s| s.filename.clone()).collect();
        filenames.sort();
        filenames.dedup();
        assert_eq!(filenames.len(), songs.len());
    }
}
