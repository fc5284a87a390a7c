//! Sound effect dispatch over a fixed pool of channels
//!
//! Effects are spread round-robin over `polyphony` channels. When the chosen
//! channel is still playing an earlier effect, that effect is cut off; there
//! is no priority-based voice stealing.
//!
//! Starting an effect takes several backend round trips. Every dispatch
//! records the stop epoch it started in; [`SfxDispatcher::stop_playing`] bumps
//! the epoch, so an effect still on its way to `play` gives up, and one whose
//! `play` was already in flight stops its channel again.

use crate::catalog::SfxCatalog;
use gameshell_core::{AudioPlayer, PlayerState, Result, SettingsSignal, SfxType};
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Channel assignment for one dispatched effect
#[derive(Debug, Clone, PartialEq)]
pub struct SfxDispatch {
    /// Index of the channel in the pool
    pub channel: usize,

    /// Requested effect type
    pub sfx: SfxType,

    /// Asset path of the chosen file
    pub asset: String,

    /// Playback volume for the effect type
    pub volume: f32,
}

/// Round-robin sound effect dispatcher
pub struct SfxDispatcher {
    channels: Vec<Arc<dyn AudioPlayer>>,
    catalog: SfxCatalog,
    asset_prefix: String,
    cursor: usize,
    runtime: Handle,

    /// Bumped by every stop; dispatches from an older epoch are cancelled
    stop_epoch: Arc<AtomicU64>,
}

impl SfxDispatcher {
    /// Create a dispatcher over `channels`
    ///
    /// Playback tasks are spawned on `runtime`.
    pub fn new(
        channels: Vec<Arc<dyn AudioPlayer>>,
        catalog: SfxCatalog,
        asset_prefix: impl Into<String>,
        runtime: Handle,
    ) -> Self {
        Self {
            channels,
            catalog,
            asset_prefix: asset_prefix.into(),
            cursor: 0,
            runtime,
            stop_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of channels
    pub fn polyphony(&self) -> usize {
        self.channels.len()
    }

    /// Channel the next effect will use
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pool channels, in cursor order
    pub fn channels(&self) -> &[Arc<dyn AudioPlayer>] {
        &self.channels
    }

    /// Asset paths of every registered effect file
    pub fn assets(&self) -> Vec<String> {
        self.catalog
            .filenames()
            .into_iter()
            .map(|filename| format!("{}{}", self.asset_prefix, filename))
            .collect()
    }

    /// Play an effect unless muted or sound effects are off
    ///
    /// Settings are read at call time. No settings attached counts as muted.
    /// Playback itself is fire-and-forget; failures are only logged.
    pub fn dispatch(
        &mut self,
        sfx: SfxType,
        settings: Option<&SettingsSignal>,
    ) -> Option<SfxDispatch> {
        let Some(settings) = settings else {
            debug!(%sfx, "Ignoring sound effect, no settings attached");
            return None;
        };
        if settings.muted.get() {
            debug!(%sfx, "Ignoring sound effect, audio is muted");
            return None;
        }
        if !settings.sounds_on.get() {
            debug!(%sfx, "Ignoring sound effect, sounds are turned off");
            return None;
        }

        let dispatch = self.assign(sfx)?;
        let channel = Arc::clone(&self.channels[dispatch.channel]);
        let asset = dispatch.asset.clone();
        let volume = dispatch.volume;
        let stop_epoch = Arc::clone(&self.stop_epoch);
        let epoch = stop_epoch.load(Ordering::SeqCst);

        self.runtime.spawn(async move {
            let stopped = || stop_epoch.load(Ordering::SeqCst) != epoch;

            if let Err(err) = start_effect(channel.as_ref(), &asset, volume, stopped).await {
                warn!(channel = channel.id(), %asset, error = %err, "Sound effect playback failed");
            }
        });

        Some(dispatch)
    }

    /// Pick a file and a channel for `sfx`, advancing the cursor
    fn assign(&mut self, sfx: SfxType) -> Option<SfxDispatch> {
        if self.channels.is_empty() {
            warn!(%sfx, "No sound effect channels available");
            return None;
        }

        let Some(entry) = self.catalog.entry(sfx) else {
            warn!(%sfx, "Sound effect type has no registered files");
            return None;
        };
        let Some(filename) = entry.filenames.choose(&mut thread_rng()) else {
            warn!(%sfx, "Sound effect type has no registered files");
            return None;
        };

        let dispatch = SfxDispatch {
            channel: self.cursor,
            sfx,
            asset: format!("{}{}", self.asset_prefix, filename),
            volume: entry.volume,
        };
        self.cursor = (self.cursor + 1) % self.channels.len();

        Some(dispatch)
    }

    /// Cancel every effect that has not started playing yet
    ///
    /// Channels that are already playing keep going.
    pub fn cancel_pending(&self) {
        self.stop_epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Stop every channel that is currently playing (best effort)
    ///
    /// Effects still being started are cancelled as well.
    pub fn stop_playing(&self) {
        self.cancel_pending();

        for channel in &self.channels {
            if channel.state() != PlayerState::Playing {
                continue;
            }

            let channel = Arc::clone(channel);
            self.runtime.spawn(async move {
                if let Err(err) = channel.stop().await {
                    warn!(channel = channel.id(), error = %err, "Failed to stop sound effect");
                }
            });
        }
    }
}

/// Load and play one effect unless `stopped` reports a stop in the meantime
async fn start_effect(
    channel: &dyn AudioPlayer,
    asset: &str,
    volume: f32,
    stopped: impl Fn() -> bool,
) -> Result<()> {
    channel.set_source(asset).await?;
    channel.set_volume(volume).await?;
    if stopped() {
        debug!(channel = channel.id(), asset, "Sound effect cancelled before playing");
        return Ok(());
    }

    channel.play().await?;
    if stopped() {
        debug!(channel = channel.id(), asset, "Sound effect cancelled while starting");
        channel.stop().await?;
    }
    Ok(())
}

impl std::fmt::Debug for SfxDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SfxDispatcher")
            .field("polyphony", &self.channels.len())
            .field("cursor", &self.cursor)
            .field("types", &self.catalog.len())
            .finish()
    }
}
