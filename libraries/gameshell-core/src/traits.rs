/// Core traits for Game Shell
///
/// Platform code (audio engines, preference stores) plugs into the shell by
/// implementing these traits.
use crate::error::Result;
use crate::types::PlayerState;
use async_trait::async_trait;
use std::sync::Arc;

/// Callback fired by a player when its source plays to the end
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// A single playback channel provided by the audio backend
///
/// All transitions are asynchronous: the backend may report the new state
/// some time after the call resolves. Asset decoding is the backend's job.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Name the channel was created with
    fn id(&self) -> &str;

    /// Load a source from a named asset path
    async fn set_source(&self, asset: &str) -> Result<()>;

    /// Start playing the current source from the beginning
    async fn play(&self) -> Result<()>;

    /// Pause playback, keeping the position
    async fn pause(&self) -> Result<()>;

    /// Resume paused playback
    async fn resume(&self) -> Result<()>;

    /// Stop playback
    async fn stop(&self) -> Result<()>;

    /// Set the volume (0.0 = silent, 1.0 = full volume)
    async fn set_volume(&self, volume: f32) -> Result<()>;

    /// Last known coarse state
    fn state(&self) -> PlayerState;

    /// Register the completion callback, replacing any previous one
    fn on_complete(&self, callback: CompletionCallback);

    /// Release the channel's resources
    async fn dispose(&self) -> Result<()>;
}

/// Audio engine able to create playback channels
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Create a named playback channel
    fn create_player(&self, id: &str) -> Arc<dyn AudioPlayer>;

    /// Load assets into the backend's in-memory cache
    ///
    /// Intended for a small, bounded set of short files.
    async fn preload(&self, assets: &[String]) -> Result<()>;
}

/// Asynchronous key-value persistence
///
/// Every call is independently fallible; callers bound them with timeouts
/// where needed. Missing keys yield `Ok(None)`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a boolean
    async fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    /// Write a boolean
    async fn set_bool(&self, key: &str, value: bool) -> Result<()>;

    /// Read a string
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Write a string
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Read an integer
    async fn get_int(&self, key: &str) -> Result<Option<i64>>;

    /// Write an integer
    async fn set_int(&self, key: &str, value: i64) -> Result<()>;
}
