//! Simulated audio backend
//!
//! Stands in for a platform audio engine: every transition takes a fixed
//! latency, tracks "play" for a fixed length and then report completion. No
//! audio is produced; transitions are logged instead.

use async_trait::async_trait;
use gameshell_audio::MUSIC_PLAYER_ID;
use gameshell_core::{
    AudioBackend, AudioPlayer, CompletionCallback, PlayerState, Result, ShellError,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::SimulationSettings;

/// Backend handing out [`SimulatedPlayer`]s
pub struct SimulatedBackend {
    settings: SimulationSettings,
    players: Mutex<Vec<Arc<SimulatedPlayer>>>,
    cache: Mutex<HashSet<String>>,
}

impl SimulatedBackend {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            settings,
            players: Mutex::new(Vec::new()),
            cache: Mutex::new(HashSet::new()),
        }
    }

    /// Player created under `id`
    pub fn player(&self, id: &str) -> Option<Arc<SimulatedPlayer>> {
        self.players.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Number of distinct preloaded assets
    pub fn cached_assets(&self) -> usize {
        self.cache.lock().len()
    }
}

#[async_trait]
impl AudioBackend for SimulatedBackend {
    fn create_player(&self, id: &str) -> Arc<dyn AudioPlayer> {
        let length = if id == MUSIC_PLAYER_ID {
            self.settings.track_length()
        } else {
            self.settings.sfx_length()
        };

        let player = SimulatedPlayer::new(id, self.settings.latency(), length);
        self.players.lock().push(Arc::clone(&player));
        debug!(player = id, "Created simulated player");
        player
    }

    async fn preload(&self, assets: &[String]) -> Result<()> {
        tokio::time::sleep(self.settings.latency()).await;
        self.cache.lock().extend(assets.iter().cloned());
        info!(count = assets.len(), "Preloaded assets");
        Ok(())
    }
}

#[derive(Debug)]
struct Playback {
    state: PlayerState,
    source: Option<String>,
    volume: f32,

    /// Bumped on every transition; a completion timer only fires if the
    /// generation it was scheduled for is still current
    generation: u64,

    /// Time left in the current source
    remaining: Duration,
    started: Option<Instant>,
    played: Vec<String>,
}

/// Player whose tracks last a fixed length
pub struct SimulatedPlayer {
    id: String,
    latency: Duration,
    length: Duration,
    this: Weak<SimulatedPlayer>,
    playback: Mutex<Playback>,
    callback: Mutex<Option<CompletionCallback>>,
}

impl SimulatedPlayer {
    fn new(id: &str, latency: Duration, length: Duration) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            id: id.to_string(),
            latency,
            length,
            this: this.clone(),
            playback: Mutex::new(Playback {
                state: PlayerState::Stopped,
                source: None,
                volume: 1.0,
                generation: 0,
                remaining: length,
                started: None,
                played: Vec::new(),
            }),
            callback: Mutex::new(None),
        })
    }

    /// Every source started with `play`, in order
    pub fn played(&self) -> Vec<String> {
        self.playback.lock().played.clone()
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.playback.lock().volume
    }

    /// Wait out the transition latency, then apply `f` unless disposed
    async fn transition<T>(&self, op: &str, f: impl FnOnce(&mut Playback) -> Result<T>) -> Result<T> {
        tokio::time::sleep(self.latency).await;

        let mut playback = self.playback.lock();
        if playback.state == PlayerState::Disposed {
            return Err(ShellError::audio(format!("{} is disposed", self.id)));
        }
        let result = f(&mut playback);
        debug!(player = %self.id, op, state = %playback.state, "Transition applied");
        result
    }

    fn schedule_completion(&self, generation: u64, after: Duration) {
        let this = self.this.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(player) = this.upgrade() {
                player.finish(generation);
            }
        });
    }

    fn finish(&self, generation: u64) {
        {
            let mut playback = self.playback.lock();
            if playback.generation != generation || playback.state != PlayerState::Playing {
                return;
            }
            playback.state = PlayerState::Completed;
            playback.started = None;
            info!(player = %self.id, source = ?playback.source, "Source finished");
        }

        let callback = self.callback.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

#[async_trait]
impl AudioPlayer for SimulatedPlayer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn set_source(&self, asset: &str) -> Result<()> {
        self.transition("set_source", |playback| {
            playback.generation += 1;
            playback.source = Some(asset.to_string());
            playback.state = PlayerState::Stopped;
            playback.remaining = self.length;
            playback.started = None;
            Ok(())
        })
        .await
    }

    async fn play(&self) -> Result<()> {
        let generation = self
            .transition("play", |playback| {
                let source = playback
                    .source
                    .clone()
                    .ok_or_else(|| ShellError::audio(format!("{} has no source", self.id)))?;
                playback.generation += 1;
                playback.state = PlayerState::Playing;
                playback.remaining = self.length;
                playback.started = Some(Instant::now());
                playback.played.push(source);
                Ok(playback.generation)
            })
            .await?;

        info!(player = %self.id, "Playing");
        self.schedule_completion(generation, self.length);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.transition("pause", |playback| {
            if playback.state == PlayerState::Playing {
                let elapsed = playback.started.map(|s| s.elapsed()).unwrap_or_default();
                playback.remaining = playback.remaining.saturating_sub(elapsed);
                playback.generation += 1;
                playback.state = PlayerState::Paused;
                playback.started = None;
            }
            Ok(())
        })
        .await
    }

    async fn resume(&self) -> Result<()> {
        let resumed = self
            .transition("resume", |playback| {
                if playback.state != PlayerState::Paused {
                    return Ok(None);
                }
                playback.generation += 1;
                playback.state = PlayerState::Playing;
                playback.started = Some(Instant::now());
                Ok(Some((playback.generation, playback.remaining)))
            })
            .await?;

        if let Some((generation, remaining)) = resumed {
            info!(player = %self.id, ?remaining, "Resumed");
            self.schedule_completion(generation, remaining);
        }
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.transition("stop", |playback| {
            playback.generation += 1;
            playback.state = PlayerState::Stopped;
            playback.remaining = self.length;
            playback.started = None;
            Ok(())
        })
        .await
    }

    async fn set_volume(&self, volume: f32) -> Result<()> {
        self.transition("set_volume", |playback| {
            playback.volume = volume.clamp(0.0, 1.0);
            Ok(())
        })
        .await
    }

    fn state(&self) -> PlayerState {
        self.playback.lock().state
    }

    fn on_complete(&self, callback: CompletionCallback) {
        *self.callback.lock() = Some(callback);
    }

    async fn dispose(&self) -> Result<()> {
        self.transition("dispose", |playback| {
            playback.generation += 1;
            playback.state = PlayerState::Disposed;
            playback.started = None;
            Ok(())
        })
        .await?;

        self.callback.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn settings() -> SimulationSettings {
        SimulationSettings {
            latency_ms: 10,
            track_length_ms: 1000,
            sfx_length_ms: 100,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn track_completes_after_its_length() {
        let backend = SimulatedBackend::new(settings());
        let player = backend.create_player(MUSIC_PLAYER_ID);
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        player.on_complete(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        player.set_source("music/a.mp3").await.unwrap();
        player.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(player.state(), PlayerState::Playing);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(player.state(), PlayerState::Completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_holds_remaining_time() {
        let backend = SimulatedBackend::new(settings());
        let player = backend.create_player(MUSIC_PLAYER_ID);

        player.set_source("music/a.mp3").await.unwrap();
        player.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        player.pause().await.unwrap();

        // Paused time does not count
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(player.state(), PlayerState::Paused);

        player.resume().await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(player.state(), PlayerState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn play_without_source_fails() {
        let backend = SimulatedBackend::new(settings());
        let player = backend.create_player("sfx-0");

        assert!(player.play().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_player_rejects_transitions() {
        let backend = SimulatedBackend::new(settings());
        let player = backend.create_player("sfx-0");
        player.dispose().await.unwrap();

        assert!(player.set_source("sfx/k1.mp3").await.is_err());
        assert_eq!(player.state(), PlayerState::Disposed);
    }

    #[tokio::test(start_paused = true)]
    async fn preload_fills_cache() {
        let backend = SimulatedBackend::new(settings());
        backend
            .preload(&["sfx/a.mp3".to_string(), "sfx/a.mp3".to_string()])
            .await
            .unwrap();

        assert_eq!(backend.cached_assets(), 1);
    }
}
