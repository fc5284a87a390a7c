//! Game Shell Audio
//!
//! Audio orchestration for the game shell: background music rotation, sound
//! effect polyphony, and the policy tying both to the user's settings and the
//! app lifecycle.
//!
//! # Architecture
//!
//! - [`MusicSequencer`]: serializes music transitions through one queue so the
//!   backend never sees overlapping state changes
//! - [`Playlist`]: shuffled circular song rotation
//! - [`SfxDispatcher`]: round-robin sound effects over a fixed channel pool
//! - [`AudioController`]: the facade reacting to settings and lifecycle signals
//!
//! The actual decoding and output is left to an
//! [`AudioBackend`](gameshell_core::AudioBackend) implementation.
//!
//! # Policy
//!
//! | Event                         | Reaction                                   |
//! |-------------------------------|--------------------------------------------|
//! | muted                         | pause music, stop playing effects          |
//! | unmuted                       | resume music if music is on and foreground |
//! | music off                     | pause music                                |
//! | music on                      | resume music if unmuted and foreground     |
//! | sounds off                    | stop playing effects                       |
//! | background / hidden / detached| pause music, stop playing effects          |
//! | foreground                    | resume music if unmuted and music is on    |
//! | song finished                 | rotate playlist, play the next song        |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod playlist;
pub mod sequencer;
pub mod sfx;
pub mod state;

pub use catalog::{SfxCatalog, SfxEntry};
pub use command::MusicCommand;
pub use config::AudioConfig;
pub use controller::{AudioController, MUSIC_PLAYER_ID};
pub use error::{AudioError, Result};
pub use playlist::Playlist;
pub use sequencer::MusicSequencer;
pub use sfx::{SfxDispatch, SfxDispatcher};
pub use state::AudioState;
