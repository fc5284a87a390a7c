//! Player progress
//!
//! Tracks the highest level the player has reached. The value only ever goes
//! up, except through an explicit [`PlayerProgress::reset`].

use crate::error::{Result, SettingsError};
use gameshell_core::{KeyValueStore, Signal};
use std::sync::Arc;
use tracing::{debug, info};

/// Store key of the highest level reached
pub const KEY_HIGHEST_LEVEL: &str = "highest_level_reached";

/// Persisted, monotonically increasing level progress
pub struct PlayerProgress {
    store: Arc<dyn KeyValueStore>,
    highest_level: Signal<u32>,
}

impl PlayerProgress {
    /// Create progress at level 0; call [`Self::load`] to restore it
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            highest_level: Signal::new(0),
        }
    }

    /// Restore progress from the store
    ///
    /// A missing key means no progress yet.
    pub async fn load(&self) -> Result<u32> {
        let level = match self.store.get_int(KEY_HIGHEST_LEVEL).await? {
            Some(stored) => u32::try_from(stored).map_err(|_| {
                SettingsError::invalid_value(KEY_HIGHEST_LEVEL, format!("{stored} is not a level"))
            })?,
            None => 0,
        };

        self.highest_level.set(level);
        debug!(level, "Loaded player progress");
        Ok(level)
    }

    /// Highest level reached so far
    pub fn highest_level_reached(&self) -> u32 {
        self.highest_level.get()
    }

    /// Observable highest level
    pub fn signal(&self) -> &Signal<u32> {
        &self.highest_level
    }

    /// Record that `level` was reached
    ///
    /// Lower or equal levels are ignored. Returns `true` when progress moved
    /// forward; the signal updates before the value is persisted.
    pub async fn set_level_reached(&self, level: u32) -> Result<bool> {
        let mut advanced = false;
        self.highest_level.update(|highest| {
            if level > *highest {
                *highest = level;
                advanced = true;
            }
        });
        if !advanced {
            return Ok(false);
        }

        info!(level, "New highest level reached");
        self.store
            .set_int(KEY_HIGHEST_LEVEL, i64::from(level))
            .await?;
        Ok(true)
    }

    /// Forget all progress
    pub async fn reset(&self) -> Result<()> {
        self.highest_level.set(0);
        info!("Player progress reset");
        self.store.set_int(KEY_HIGHEST_LEVEL, 0).await?;
        Ok(())
    }
}

impl std::fmt::Debug for PlayerProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerProgress")
            .field("highest_level", &self.highest_level.get())
            .finish()
    }
}
