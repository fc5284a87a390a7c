//! Configuration for the settings collaborator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`SettingsController`](crate::SettingsController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Upper bound for loading persisted settings, in milliseconds (default: 5000)
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// Player name used until one is stored (default: "Player")
    #[serde(default = "default_player_name")]
    pub default_player_name: String,
}

fn default_load_timeout_ms() -> u64 {
    5000
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl SettingsConfig {
    /// Load timeout as a [`Duration`]
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: default_load_timeout_ms(),
            default_player_name: default_player_name(),
        }
    }
}
