//! Property-based tests for playlist rotation
//!
//! The rotation must never lose or duplicate a song, whatever the catalog size
//! or number of advances.

use gameshell_audio::{MusicCommand, Playlist};
use gameshell_core::Song;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn catalog(size: usize) -> Vec<Song> {
    (0..size)
        .map(|i| Song::new(format!("Song {i}"), format!("song{i}.mp3")))
        .collect()
}

fn sorted_filenames(playlist: &Playlist) -> Vec<String> {
    let mut filenames: Vec<String> = playlist.songs().map(|s| s.filename.clone()).collect();
    filenames.sort();
    filenames
}

proptest! {
    /// Property: the multiset of songs survives any number of advances
    #[test]
    fn advance_preserves_catalog(size in 1usize..30, advances in 0usize..100, seed in any::<u64>()) {
        let songs = catalog(size);
        let mut expected: Vec<String> = songs.iter().map(|s| s.filename.clone()).collect();
        expected.sort();

        let mut playlist = Playlist::with_rng(songs, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(sorted_filenames(&playlist), expected.clone());

        for _ in 0..advances {
            playlist.advance();
            prop_assert_eq!(playlist.len(), size);
        }

        prop_assert_eq!(sorted_filenames(&playlist), expected);
    }

    /// Property: every song is back at the front after exactly `len` advances
    #[test]
    fn song_returns_to_front_after_len_advances(size in 1usize..30, seed in any::<u64>()) {
        let mut playlist = Playlist::with_rng(catalog(size), &mut StdRng::seed_from_u64(seed));
        let first = playlist.current().cloned();

        for step in 1..=size {
            playlist.advance();
            if step < size {
                prop_assert_ne!(playlist.current().cloned(), first.clone());
            }
        }

        prop_assert_eq!(playlist.current().cloned(), first);
    }

    /// Property: advance always plays the new front
    #[test]
    fn advance_plays_new_front(size in 1usize..10, advances in 1usize..20) {
        let mut playlist = Playlist::in_order(catalog(size)).with_asset_prefix("music/");

        for _ in 0..advances {
            let command = playlist.advance();
            let front = playlist.current().map(|s| format!("music/{}", s.filename));
            prop_assert_eq!(command, front.map(MusicCommand::Play));
        }
    }
}
