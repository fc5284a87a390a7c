/// Demo error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio error: {0}")]
    Audio(#[from] gameshell_audio::AudioError),

    #[error("Settings error: {0}")]
    Settings(#[from] gameshell_settings::SettingsError),

    #[error("Storage error: {0}")]
    Storage(#[from] gameshell_core::ShellError),
}

impl From<config::ConfigError> for DemoError {
    fn from(err: config::ConfigError) -> Self {
        DemoError::Config(err.to_string())
    }
}
