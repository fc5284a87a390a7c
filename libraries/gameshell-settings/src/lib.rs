//! Game Shell Settings
//!
//! Persisted user settings and player progress on top of any
//! [`KeyValueStore`](gameshell_core::KeyValueStore).
//!
//! - [`SettingsController`]: mute, music and sound switches plus the player
//!   name, loaded within a bounded time and persisted on every change
//! - [`PlayerProgress`]: highest level reached, only ever increasing
//! - [`MemoryStore`] and [`JsonFileStore`]: store implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use gameshell_settings::{JsonFileStore, PlayerProgress, SettingsController};
//! use std::sync::Arc;
//!
//! # async fn example() -> gameshell_settings::Result<()> {
//! let store = Arc::new(JsonFileStore::new("gameshell.json"));
//!
//! let settings = SettingsController::new(store.clone());
//! settings.load_state_from_persistence().await;
//!
//! let progress = PlayerProgress::new(store);
//! progress.load().await?;
//! progress.set_level_reached(3).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod progress;
pub mod store;

pub use config::SettingsConfig;
pub use controller::SettingsController;
pub use error::{Result, SettingsError};
pub use progress::PlayerProgress;
pub use store::{JsonFileStore, MemoryStore};
