//! Shared test backend
//!
//! `FakeBackend` hands out `FakePlayer`s that record every call, take a fixed
//! (virtual) time to complete each transition, and can be told to fail.
//! Tests run with `start_paused = true`, so latency costs no wall-clock time.

#![allow(dead_code)]

use async_trait::async_trait;
use gameshell_core::{
    AudioBackend, AudioPlayer, CompletionCallback, PlayerState, Result, ShellError,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Latency of every fake player transition
pub const LATENCY: Duration = Duration::from_millis(50);

/// One recorded player call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource(String),
    Play,
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
    Dispose,
}

impl Call {
    fn op(&self) -> &'static str {
        match self {
            Self::SetSource(_) => "set_source",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::SetVolume(_) => "set_volume",
            Self::Dispose => "dispose",
        }
    }
}

pub struct FakePlayer {
    id: String,
    latency: Duration,
    calls: Mutex<Vec<Call>>,
    state: Mutex<PlayerState>,
    failing: Mutex<HashSet<&'static str>>,
    callback: Mutex<Option<CompletionCallback>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakePlayer {
    pub fn new(id: &str, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            latency,
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(PlayerState::Stopped),
            failing: Mutex::new(HashSet::new()),
            callback: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Number of recorded calls matching `call`
    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    /// Make every future call of `op` (e.g. `"resume"`) fail
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn set_state(&self, state: PlayerState) {
        *self.state.lock() = state;
    }

    /// Highest number of transitions observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Simulate the current source playing to the end
    pub fn complete(&self) {
        *self.state.lock() = PlayerState::Completed;
        let callback = self.callback.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    async fn transition(&self, call: Call, next: impl FnOnce(PlayerState) -> PlayerState) -> Result<()> {
        let op = call.op();
        self.calls.lock().push(call);

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().contains(op) {
            return Err(ShellError::audio(format!("{} failed on {}", op, self.id)));
        }

        let mut state = self.state.lock();
        *state = next(*state);
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for FakePlayer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn set_source(&self, asset: &str) -> Result<()> {
        self.transition(Call::SetSource(asset.to_string()), |_| PlayerState::Stopped)
            .await
    }

    async fn play(&self) -> Result<()> {
        self.transition(Call::Play, |_| PlayerState::Playing).await
    }

    async fn pause(&self) -> Result<()> {
        self.transition(Call::Pause, |state| match state {
            PlayerState::Playing => PlayerState::Paused,
            other => other,
        })
        .await
    }

    async fn resume(&self) -> Result<()> {
        self.transition(Call::Resume, |state| match state {
            PlayerState::Paused => PlayerState::Playing,
            other => other,
        })
        .await
    }

    async fn stop(&self) -> Result<()> {
        self.transition(Call::Stop, |_| PlayerState::Stopped).await
    }

    async fn set_volume(&self, volume: f32) -> Result<()> {
        self.transition(Call::SetVolume(volume), |state| state).await
    }

    fn state(&self) -> PlayerState {
        *self.state.lock()
    }

    fn on_complete(&self, callback: CompletionCallback) {
        *self.callback.lock() = Some(callback);
    }

    async fn dispose(&self) -> Result<()> {
        self.transition(Call::Dispose, |_| PlayerState::Disposed).await
    }
}

#[derive(Default)]
pub struct FakeBackend {
    latency: Duration,
    players: Mutex<HashMap<String, Arc<FakePlayer>>>,
    preloaded: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Self::with_latency(LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            ..Self::default()
        })
    }

    /// Player created under `id`
    ///
    /// # Panics
    /// Panics if no such player was created.
    pub fn player(&self, id: &str) -> Arc<FakePlayer> {
        self.players
            .lock()
            .get(id)
            .cloned()
            .unwrap_or_else(|| panic!("no player named {id}"))
    }

    pub fn music(&self) -> Arc<FakePlayer> {
        self.player("music")
    }

    pub fn sfx(&self, channel: usize) -> Arc<FakePlayer> {
        self.player(&format!("sfx-{channel}"))
    }

    pub fn player_count(&self) -> usize {
        self.players.lock().len()
    }

    pub fn preloaded(&self) -> Vec<String> {
        self.preloaded.lock().clone()
    }
}

#[async_trait]
impl AudioBackend for FakeBackend {
    fn create_player(&self, id: &str) -> Arc<dyn AudioPlayer> {
        let player = FakePlayer::new(id, self.latency);
        self.players.lock().insert(id.to_string(), Arc::clone(&player));
        player
    }

    async fn preload(&self, assets: &[String]) -> Result<()> {
        self.preloaded.lock().extend(assets.iter().cloned());
        Ok(())
    }
}

/// Let spawned tasks run until the virtual clock has moved past pending work
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(1)).await;
}
