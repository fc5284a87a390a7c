/// Demo configuration
use crate::error::{DemoError, Result};
use gameshell_audio::AudioConfig;
use gameshell_settings::SettingsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "gameshell.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON file holding settings and progress
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

/// Timing of the simulated audio backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Time every player transition takes
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Length of every music track
    #[serde(default = "default_track_length_ms")]
    pub track_length_ms: u64,

    /// Length of every sound effect
    #[serde(default = "default_sfx_length_ms")]
    pub sfx_length_ms: u64,
}

impl SimulationSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_millis(self.track_length_ms)
    }

    pub fn sfx_length(&self) -> Duration {
        Duration::from_millis(self.sfx_length_ms)
    }
}

impl DemoConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` (which must exist) or, without one, `gameshell.toml` when
    /// present. `GAMESHELL_` variables override file values; nested keys are
    /// separated by a double underscore, e.g. `GAMESHELL_AUDIO__POLYPHONY=4`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Self::load`], reading variables from `env` instead of the process
    pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with GAMESHELL_)
        settings = settings.add_source(
            config::Environment::with_prefix("GAMESHELL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.polyphony == 0 {
            return Err(DemoError::Config(
                "audio.polyphony must be at least 1 (set GAMESHELL_AUDIO__POLYPHONY)".to_string(),
            ));
        }

        if self.simulation.track_length_ms == 0 || self.simulation.sfx_length_ms == 0 {
            return Err(DemoError::Config(
                "simulated track and effect lengths must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/gameshell.json")
}

fn default_latency_ms() -> u64 {
    40
}

fn default_track_length_ms() -> u64 {
    3000
}

fn default_sfx_length_ms() -> u64 {
    250
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            track_length_ms: default_track_length_ms(),
            sfx_length_ms: default_sfx_length_ms(),
        }
    }
}
