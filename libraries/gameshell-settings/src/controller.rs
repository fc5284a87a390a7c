//! Persisted user settings
//!
//! The three audio switches and the player name live in observable signals
//! that start at compiled-in defaults. Loading from the store is bounded in
//! time; on any failure the defaults stay in place and the outcome is
//! published as a plain boolean.

use crate::config::SettingsConfig;
use crate::error::{Result, SettingsError};
use gameshell_core::{KeyValueStore, SettingsSignal, Signal};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Store key of the global mute switch
pub const KEY_MUTED: &str = "muted";

/// Store key of the music switch
pub const KEY_MUSIC_ON: &str = "music_on";

/// Store key of the sound effects switch
pub const KEY_SOUNDS_ON: &str = "sounds_on";

/// Store key of the player name
pub const KEY_PLAYER_NAME: &str = "player_name";

/// Values read from the store; `None` means the key was never written
#[derive(Debug, Default)]
struct Stored {
    muted: Option<bool>,
    music_on: Option<bool>,
    sounds_on: Option<bool>,
    player_name: Option<String>,
}

/// Owner of the user's settings
///
/// # Example
///
/// ```rust,no_run
/// use gameshell_settings::{MemoryStore, SettingsController};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let settings = SettingsController::new(Arc::new(MemoryStore::new()));
///
/// if !settings.load_state_from_persistence().await {
///     // Defaults are in effect
/// }
///
/// settings.toggle_muted().await;
/// assert!(settings.audio().muted.get());
/// # }
/// ```
pub struct SettingsController {
    store: Arc<dyn KeyValueStore>,
    config: SettingsConfig,
    audio: SettingsSignal,
    player_name: Signal<String>,
    loaded: watch::Sender<Option<bool>>,
}

impl SettingsController {
    /// Create a controller with the default configuration
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, SettingsConfig::default())
    }

    /// Create a controller; every signal starts at its default
    pub fn with_config(store: Arc<dyn KeyValueStore>, config: SettingsConfig) -> Self {
        let (loaded, _) = watch::channel(None);
        Self {
            store,
            audio: SettingsSignal::default(),
            player_name: Signal::new(config.default_player_name.clone()),
            config,
            loaded,
        }
    }

    /// Audio switches, to hand to the audio controller
    pub fn audio(&self) -> &SettingsSignal {
        &self.audio
    }

    /// Player name
    pub fn player_name(&self) -> &Signal<String> {
        &self.player_name
    }

    /// Load every setting from the store within the configured timeout
    ///
    /// Returns `true` when all values were read. Keys that were never written
    /// keep their defaults. On a store error or timeout nothing is applied.
    pub async fn load_state_from_persistence(&self) -> bool {
        let timeout = self.config.load_timeout();
        let loaded = match self.load(timeout).await {
            Ok(()) => {
                info!("Settings loaded");
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to load settings, keeping defaults");
                false
            }
        };

        self.loaded.send_replace(Some(loaded));
        loaded
    }

    async fn load(&self, timeout: std::time::Duration) -> Result<()> {
        let stored = tokio::time::timeout(timeout, self.read_all())
            .await
            .map_err(|_| SettingsError::Timeout(timeout))??;

        debug!(?stored, "Applying stored settings");
        if let Some(muted) = stored.muted {
            self.audio.muted.set(muted);
        }
        if let Some(music_on) = stored.music_on {
            self.audio.music_on.set(music_on);
        }
        if let Some(sounds_on) = stored.sounds_on {
            self.audio.sounds_on.set(sounds_on);
        }
        if let Some(player_name) = stored.player_name {
            self.player_name.set(player_name);
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Stored> {
        let (muted, music_on, sounds_on, player_name) = tokio::try_join!(
            self.store.get_bool(KEY_MUTED),
            self.store.get_bool(KEY_MUSIC_ON),
            self.store.get_bool(KEY_SOUNDS_ON),
            self.store.get_string(KEY_PLAYER_NAME),
        )?;

        Ok(Stored {
            muted,
            music_on,
            sounds_on,
            player_name,
        })
    }

    /// Outcome of the load, waiting for it if it has not finished yet
    pub async fn has_loaded_successfully(&self) -> bool {
        let mut loaded = self.loaded.subscribe();
        let outcome = match loaded.wait_for(Option::is_some).await {
            Ok(outcome) => *outcome,
            // The sender lives as long as `self`
            Err(_) => None,
        };
        outcome.unwrap_or(false)
    }

    /// Outcome of the load, if it has finished
    pub fn load_outcome(&self) -> Option<bool> {
        *self.loaded.borrow()
    }

    /// Flip the global mute switch; returns the new value
    pub async fn toggle_muted(&self) -> bool {
        self.toggle(&self.audio.muted, KEY_MUTED).await
    }

    /// Flip the music switch; returns the new value
    pub async fn toggle_music_on(&self) -> bool {
        self.toggle(&self.audio.music_on, KEY_MUSIC_ON).await
    }

    /// Flip the sound effects switch; returns the new value
    pub async fn toggle_sounds_on(&self) -> bool {
        self.toggle(&self.audio.sounds_on, KEY_SOUNDS_ON).await
    }

    /// Rename the player
    ///
    /// Surrounding whitespace is trimmed. The name is rejected when empty;
    /// otherwise the signal updates and the name is persisted best effort.
    pub async fn set_player_name(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettingsError::invalid_value(KEY_PLAYER_NAME, "must not be empty"));
        }

        self.player_name.set(name.to_string());
        if let Err(err) = self.store.set_string(KEY_PLAYER_NAME, name).await {
            warn!(key = KEY_PLAYER_NAME, error = %err, "Failed to persist setting");
        }
        Ok(())
    }

    async fn toggle(&self, signal: &Signal<bool>, key: &'static str) -> bool {
        let value = !signal.get();
        signal.set(value);
        info!(key, value, "Setting toggled");

        if let Err(err) = self.store.set_bool(key, value).await {
            warn!(key, error = %err, "Failed to persist setting");
        }
        value
    }
}

impl std::fmt::Debug for SettingsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsController")
            .field("muted", &self.audio.muted.get())
            .field("music_on", &self.audio.music_on.get())
            .field("sounds_on", &self.audio.sounds_on.get())
            .field("player_name", &self.player_name.get())
            .field("loaded", &self.load_outcome())
            .finish()
    }
}
