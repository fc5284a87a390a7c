//! Scripted game session
//!
//! Wires settings, progress and audio together the way a game shell does at
//! startup, then plays through a short script: a few sound effects, a song
//! change, a trip to the background, and the settings toggles.

use crate::backend::SimulatedBackend;
use crate::config::DemoConfig;
use crate::error::Result;
use gameshell_audio::{AudioController, AudioState, MUSIC_PLAYER_ID};
use gameshell_core::{AppLifecycle, KeyValueStore, LifecycleSignal, SfxType};
use gameshell_settings::{PlayerProgress, SettingsController};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// What happened during a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Whether stored settings were loaded in time
    pub settings_loaded: bool,

    /// Music sources started, in order
    pub songs_played: Vec<String>,

    /// Sound effects that reached a channel
    pub effects_played: usize,

    /// Assets preloaded into the backend cache
    pub cached_assets: usize,

    /// Highest level after the session
    pub highest_level: u32,

    /// Audio policy state right before shutdown
    pub final_state: AudioState,
}

/// Run the scripted session against `store`
pub async fn run_session(config: &DemoConfig, store: Arc<dyn KeyValueStore>) -> Result<SessionReport> {
    let settings = SettingsController::with_config(Arc::clone(&store), config.settings.clone());
    let settings_loaded = settings.load_state_from_persistence().await;

    let progress = PlayerProgress::new(store);
    if let Err(err) = progress.load().await {
        warn!(error = %err, "Failed to load progress, starting from scratch");
    }

    let backend = Arc::new(SimulatedBackend::new(config.simulation.clone()));
    let audio = AudioController::new(backend.clone(), config.audio.clone())?;
    let lifecycle = LifecycleSignal::new(AppLifecycle::Foreground);
    audio.attach_dependencies(&lifecycle, settings.audio());

    let beat = config.simulation.latency() * 4;
    let track = config.simulation.track_length();

    info!(player = %settings.player_name().get(), "Starting level");
    for sfx in [SfxType::ButtonTap, SfxType::Jump, SfxType::Jump, SfxType::Congrats] {
        audio.play_sfx(sfx);
        pause(beat).await;
    }
    let next_level = progress.highest_level_reached() + 1;
    if let Err(err) = progress.set_level_reached(next_level).await {
        warn!(error = %err, "Failed to save progress");
    }

    info!(song = ?audio.current_song(), "Waiting for the song to finish");
    pause(track + beat).await;

    info!("Moving to the background and back");
    lifecycle.set(AppLifecycle::Background);
    pause(beat).await;
    lifecycle.set(AppLifecycle::Foreground);
    pause(beat).await;

    info!("Toggling music off and on");
    settings.toggle_music_on().await;
    pause(beat).await;
    settings.toggle_music_on().await;
    pause(beat).await;

    info!("Muting and unmuting");
    settings.toggle_muted().await;
    audio.play_sfx(SfxType::WrongAnswer);
    pause(beat).await;
    settings.toggle_muted().await;
    pause(beat).await;

    let final_state = audio.state();
    audio.dispose().await;

    let songs_played = backend
        .player(MUSIC_PLAYER_ID)
        .map(|player| player.played())
        .unwrap_or_default();
    let effects_played = (0..config.audio.polyphony)
        .filter_map(|channel| backend.player(&format!("sfx-{channel}")))
        .map(|player| player.played().len())
        .sum();

    let report = SessionReport {
        settings_loaded,
        songs_played,
        effects_played,
        cached_assets: backend.cached_assets(),
        highest_level: progress.highest_level_reached(),
        final_state,
    };
    info!(
        songs = report.songs_played.len(),
        effects = report.effects_played,
        level = report.highest_level,
        "Session finished"
    );

    Ok(report)
}

async fn pause(duration: Duration) {
    tokio::time::sleep(duration).await;
}
