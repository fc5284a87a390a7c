//! Audio controller - public facade
//!
//! Owns the music sequencer, the playlist, and the sound effect pool, and
//! keeps them in line with the attached settings and lifecycle signals.
//!
//! Signals are observed, never owned: the controller keeps weak handles plus
//! one set of [`Subscription`]s per signal, and re-attaching replaces them.

use crate::{
    catalog::{self, SfxCatalog},
    command::MusicCommand,
    config::AudioConfig,
    error::{AudioError, Result},
    playlist::Playlist,
    sequencer::MusicSequencer,
    sfx::SfxDispatcher,
    state::AudioState,
};
use gameshell_core::{
    AppLifecycle, AudioBackend, AudioPlayer, LifecycleSignal, PlayerState, SettingsSignal,
    SfxType, Signal, Song, Subscription, WeakSettingsSignal, WeakSignal,
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Backend channel name of the music player
pub const MUSIC_PLAYER_ID: &str = "music";

/// An attached external signal and the listeners registered on it
struct Attachment<S> {
    signal: S,
    _subscriptions: Vec<Subscription>,
}

/// Public facade of the audio core
///
/// # Example
///
/// ```rust,no_run
/// use gameshell_audio::{AudioConfig, AudioController};
/// use gameshell_core::{AppLifecycle, AudioBackend, LifecycleSignal, SettingsSignal, SfxType};
/// use std::sync::Arc;
///
/// # async fn example(backend: Arc<dyn AudioBackend>) -> gameshell_audio::Result<()> {
/// let audio = AudioController::new(backend, AudioConfig::default())?;
///
/// let lifecycle = LifecycleSignal::new(AppLifecycle::Foreground);
/// let settings = SettingsSignal::default();
/// audio.attach_dependencies(&lifecycle, &settings);
///
/// audio.play_sfx(SfxType::ButtonTap);
///
/// audio.dispose().await;
/// # Ok(())
/// # }
/// ```
pub struct AudioController {
    inner: Arc<Inner>,
}

struct Inner {
    music: Arc<dyn AudioPlayer>,
    sequencer: Mutex<MusicSequencer>,
    playlist: Mutex<Playlist>,
    sfx: Mutex<SfxDispatcher>,
    state: Signal<AudioState>,
    settings: Mutex<Option<Attachment<WeakSettingsSignal>>>,
    lifecycle: Mutex<Option<Attachment<WeakSignal<AppLifecycle>>>>,
}

impl AudioController {
    /// Create a controller over the built-in song and sound effect catalogs
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(backend: Arc<dyn AudioBackend>, config: AudioConfig) -> Result<Self> {
        Self::with_catalog(backend, config, catalog::songs(), SfxCatalog::builtin())
    }

    /// Create a controller over custom catalogs
    ///
    /// Creates the music player and `config.polyphony` effect channels, starts
    /// the music sequencer, and preloads every effect file in the background.
    ///
    /// # Errors
    /// - [`AudioError::InvalidPolyphony`] when `config.polyphony` is zero
    /// - [`AudioError::NoRuntime`] outside a tokio runtime
    pub fn with_catalog(
        backend: Arc<dyn AudioBackend>,
        config: AudioConfig,
        songs: Vec<Song>,
        sfx_catalog: SfxCatalog,
    ) -> Result<Self> {
        if config.polyphony == 0 {
            return Err(AudioError::InvalidPolyphony(config.polyphony));
        }
        let runtime = Handle::try_current().map_err(|_| AudioError::NoRuntime)?;

        let music = backend.create_player(MUSIC_PLAYER_ID);
        let channels: Vec<Arc<dyn AudioPlayer>> = (0..config.polyphony)
            .map(|i| backend.create_player(&format!("sfx-{i}")))
            .collect();

        let playlist = if config.shuffle {
            Playlist::new(songs)
        } else {
            Playlist::in_order(songs)
        }
        .with_asset_prefix(config.music_prefix.clone());

        let sfx = SfxDispatcher::new(channels, sfx_catalog, config.sfx_prefix.clone(), runtime.clone());
        let assets = sfx.assets();

        let inner = Arc::new(Inner {
            sequencer: Mutex::new(MusicSequencer::spawn_on(&runtime, Arc::clone(&music))),
            music,
            playlist: Mutex::new(playlist),
            sfx: Mutex::new(sfx),
            state: Signal::new(AudioState::default()),
            settings: Mutex::new(None),
            lifecycle: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        inner.music.on_complete(Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_song_finished();
            }
        }));

        runtime.spawn(async move {
            match backend.preload(&assets).await {
                Ok(()) => debug!(count = assets.len(), "Preloaded sound effects"),
                Err(err) => warn!(error = %err, "Failed to preload sound effects"),
            }
        });

        info!(
            polyphony = config.polyphony,
            songs = inner.playlist.lock().len(),
            "Audio controller initialized"
        );

        Ok(Self { inner })
    }

    /// Attach both external signals
    pub fn attach_dependencies(&self, lifecycle: &LifecycleSignal, settings: &SettingsSignal) {
        self.attach_lifecycle(lifecycle);
        self.attach_settings(settings);
    }

    /// Observe a lifecycle signal, detaching any previous one
    ///
    /// Attaching the instance that is already attached does nothing.
    pub fn attach_lifecycle(&self, lifecycle: &LifecycleSignal) {
        let inner = &self.inner;
        if inner
            .lifecycle
            .lock()
            .as_ref()
            .is_some_and(|attached| attached.signal.is(lifecycle))
        {
            debug!("Lifecycle signal already attached");
            return;
        }

        let subscription = lifecycle.subscribe(listener(inner, Inner::on_lifecycle_changed));
        let previous = inner.lifecycle.lock().replace(Attachment {
            signal: lifecycle.downgrade(),
            _subscriptions: vec![subscription],
        });
        drop(previous);

        let current = lifecycle.get();
        inner.state.update(|state| state.lifecycle = current);
        debug!(lifecycle = %current, "Attached lifecycle signal");
    }

    /// Observe a settings bundle, detaching any previous one
    ///
    /// Attaching the instance that is already attached does nothing. Music
    /// starts right away when the new settings allow it.
    pub fn attach_settings(&self, settings: &SettingsSignal) {
        let inner = &self.inner;
        if inner
            .settings
            .lock()
            .as_ref()
            .is_some_and(|attached| attached.signal.is(settings))
        {
            debug!("Settings signal already attached");
            return;
        }

        let subscriptions = vec![
            settings
                .muted
                .subscribe(listener(inner, Inner::on_muted_changed)),
            settings
                .music_on
                .subscribe(listener(inner, Inner::on_music_on_changed)),
            settings
                .sounds_on
                .subscribe(listener(inner, Inner::on_sounds_on_changed)),
        ];
        let previous = inner.settings.lock().replace(Attachment {
            signal: settings.downgrade(),
            _subscriptions: subscriptions,
        });
        drop(previous);

        let was_audible = inner.state.get().music_audible();
        let (muted, music_on, sounds_on) = (
            settings.muted.get(),
            settings.music_on.get(),
            settings.sounds_on.get(),
        );
        inner.state.update(|state| {
            state.muted = muted;
            state.music_on = music_on;
            state.sounds_on = sounds_on;
        });
        info!(muted, music_on, sounds_on, "Attached settings");

        if inner.state.get().music_audible() {
            inner.resume_music();
        } else if was_audible {
            inner.stop_all_sound();
        }
    }

    /// Stop observing the lifecycle signal
    pub fn detach_lifecycle(&self) {
        if self.inner.lifecycle.lock().take().is_some() {
            debug!("Detached lifecycle signal");
        }
    }

    /// Stop observing the settings bundle
    ///
    /// Sound effects are ignored until settings are attached again.
    pub fn detach_settings(&self) {
        if self.inner.settings.lock().take().is_some() {
            debug!("Detached settings signal");
        }
    }

    /// Play a sound effect (best effort)
    ///
    /// Ignored when muted, when sound effects are off, or when no settings are
    /// attached. Otherwise picks one of the type's files at random and plays
    /// it on the next channel of the pool.
    pub fn play_sfx(&self, sfx: SfxType) {
        self.inner.play_sfx(sfx);
    }

    /// Current policy state
    pub fn state(&self) -> AudioState {
        self.inner.state.get()
    }

    /// Observe policy state changes
    pub fn subscribe_state<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AudioState) + Send + Sync + 'static,
    {
        self.inner.state.subscribe(listener)
    }

    /// Song at the front of the playlist
    pub fn current_song(&self) -> Option<Song> {
        self.inner.playlist.lock().current().cloned()
    }

    /// Songs in rotation order, current first
    pub fn playlist(&self) -> Vec<Song> {
        self.inner.playlist.lock().songs().cloned().collect()
    }

    /// Number of sound effect channels
    pub fn polyphony(&self) -> usize {
        self.inner.sfx.lock().polyphony()
    }

    /// Number of music commands fully processed
    pub fn processed_commands(&self) -> usize {
        self.inner.sequencer.lock().processed()
    }

    /// Tear the controller down
    ///
    /// Detaches every signal listener, closes the command stream and waits
    /// for queued commands to finish. Effects that have not started yet are
    /// cancelled; then the music player and every effect channel are stopped
    /// and released. Consuming `self` rules out double disposal.
    pub async fn dispose(self) {
        info!("Disposing audio controller");
        let inner = self.inner;

        let lifecycle = inner.lifecycle.lock().take();
        let settings = inner.settings.lock().take();
        drop((lifecycle, settings));

        let task = inner.sequencer.lock().close();
        if let Some(task) = task {
            if let Err(err) = task.await {
                warn!(error = %err, "Music sequencer ended abnormally");
            }
        }

        let channels: Vec<Arc<dyn AudioPlayer>> = {
            let sfx = inner.sfx.lock();
            sfx.cancel_pending();
            sfx.channels().to_vec()
        };
        release(inner.music.as_ref()).await;
        for channel in &channels {
            release(channel.as_ref()).await;
        }

        debug!("Audio controller disposed");
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("state", &self.inner.state.get())
            .field("music", &self.inner.music.state())
            .field("sfx", &*self.inner.sfx.lock())
            .finish()
    }
}

impl Inner {
    fn on_muted_changed(&self, muted: bool) {
        self.state.update(|state| state.muted = muted);

        if muted {
            self.stop_all_sound();
        } else if self.state.get().music_audible() {
            self.resume_music();
        }
    }

    fn on_music_on_changed(&self, music_on: bool) {
        self.state.update(|state| state.music_on = music_on);

        if !music_on {
            info!("Music turned off");
            self.submit(MusicCommand::Pause);
        } else if self.state.get().music_audible() {
            self.resume_music();
        }
    }

    fn on_sounds_on_changed(&self, sounds_on: bool) {
        self.state.update(|state| state.sounds_on = sounds_on);

        if !sounds_on {
            debug!("Sound effects turned off, stopping channels");
            self.sfx.lock().stop_playing();
        }
    }

    fn on_lifecycle_changed(&self, lifecycle: AppLifecycle) {
        self.state.update(|state| state.lifecycle = lifecycle);
        debug!(%lifecycle, "Lifecycle changed");

        match lifecycle {
            AppLifecycle::Foreground => {
                if self.state.get().music_audible() {
                    self.resume_music();
                }
            }
            AppLifecycle::Background | AppLifecycle::Detached | AppLifecycle::Hidden => {
                self.stop_all_sound();
            }
            AppLifecycle::Inactive => {}
        }
    }

    fn on_song_finished(&self) {
        let command = {
            let mut playlist = self.playlist.lock();
            let command = playlist.advance();
            if let Some(song) = playlist.current() {
                info!(next = %song, "Song finished, advancing playlist");
            }
            command
        };

        if let Some(command) = command {
            self.submit(command);
        }
    }

    fn play_sfx(&self, sfx: SfxType) {
        let settings = self
            .settings
            .lock()
            .as_ref()
            .and_then(|attached| attached.signal.upgrade());

        if let Some(dispatch) = self.sfx.lock().dispatch(sfx, settings.as_ref()) {
            debug!(%sfx, channel = dispatch.channel, asset = %dispatch.asset, "Playing sound effect");
        }
    }

    /// Bring music back according to the state the player is headed for
    ///
    /// Queued commands count: a Pause still waiting in the sequencer means
    /// the music is paused even while the player reports Playing. "Stopped"
    /// can mean "never started" or "stopped on purpose"; both are treated as
    /// never started and the playlist is (re)started.
    fn resume_music(&self) {
        let expected = self.sequencer.lock().expected_state();
        match expected {
            PlayerState::Paused => {
                info!("Resuming music");
                self.submit(MusicCommand::Resume);
            }
            PlayerState::Stopped => {
                info!("Music not started yet, starting playlist");
                self.start_music();
            }
            PlayerState::Completed => {
                info!("Music completed, restarting playlist");
                self.start_music();
            }
            PlayerState::Playing => {
                info!("Music already playing");
            }
            PlayerState::Disposed => {
                warn!("Music player already disposed, cannot resume");
            }
        }
    }

    fn start_music(&self) {
        let command = self.playlist.lock().start();
        match command {
            Some(command) => self.submit(command),
            None => warn!("Playlist is empty, nothing to play"),
        }
    }

    fn stop_all_sound(&self) {
        info!("Stopping all sound");
        self.submit(MusicCommand::Pause);
        self.sfx.lock().stop_playing();
    }

    fn submit(&self, command: MusicCommand) {
        self.sequencer.lock().submit(command);
    }
}

/// Listener forwarding signal values to `handler` while the controller lives
fn listener<T>(inner: &Arc<Inner>, handler: fn(&Inner, T)) -> impl Fn(&T) + Send + Sync + 'static
where
    T: Copy + 'static,
{
    let weak: Weak<Inner> = Arc::downgrade(inner);
    move |value: &T| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, *value);
        }
    }
}

/// Stop and dispose a player, logging failures
async fn release(player: &dyn AudioPlayer) {
    if let Err(err) = player.stop().await {
        warn!(player = player.id(), error = %err, "Failed to stop player");
    }
    if let Err(err) = player.dispose().await {
        warn!(player = player.id(), error = %err, "Failed to dispose player");
    }
}
