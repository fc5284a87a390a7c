//! Music command sequencer
//!
//! The background music player reports state changes asynchronously and with
//! latency. Issuing a second transition before the first settles leaves the
//! observed state inconsistent (e.g. "stopped" reported while playback is
//! about to start). The sequencer serializes every transition through one
//! unbounded queue and a single consumer task:
//!
//! ```text
//! submit(Play) ─┐
//! submit(Pause) ├──► [ queue ] ──► consumer: await op 1 ──► await op 2 ──► ...
//! submit(Resume)┘
//! ```
//!
//! Producers never block and never see failures. Backend errors are logged and
//! the consumer moves on to the next command.
//!
//! Because the player lags behind the queue, its reported state says nothing
//! about commands still waiting to run. [`MusicSequencer::expected_state`]
//! answers with the state the player reaches once the queue drains.

use crate::command::MusicCommand;
use gameshell_core::{AudioPlayer, PlayerState};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Serializes commands against a single music player
pub struct MusicSequencer {
    player: Arc<dyn AudioPlayer>,

    /// Command sender (`None` once closed)
    command_tx: Option<mpsc::UnboundedSender<MusicCommand>>,

    /// Consumer task (`None` once handed out by `close`)
    task: Option<JoinHandle<()>>,

    /// Number of commands accepted by `submit`
    submitted: AtomicUsize,

    /// Number of commands fully processed
    processed: Arc<AtomicUsize>,

    /// Player state once every submitted command has run
    projected: Mutex<PlayerState>,
}

impl MusicSequencer {
    /// Spawn the consumer on the current tokio runtime
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime; use [`Self::spawn_on`] with
    /// an explicit handle otherwise.
    pub fn spawn(player: Arc<dyn AudioPlayer>) -> Self {
        Self::spawn_on(&Handle::current(), player)
    }

    /// Spawn the consumer on the given runtime
    pub fn spawn_on(runtime: &Handle, player: Arc<dyn AudioPlayer>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let processed = Arc::new(AtomicUsize::new(0));

        let projected = Mutex::new(player.state());
        let task = runtime.spawn(run(Arc::clone(&player), command_rx, Arc::clone(&processed)));

        Self {
            player,
            command_tx: Some(command_tx),
            task: Some(task),
            submitted: AtomicUsize::new(0),
            processed,
            projected,
        }
    }

    /// Queue a command (fire-and-forget)
    pub fn submit(&self, command: MusicCommand) {
        let Some(command_tx) = &self.command_tx else {
            warn!(%command, "Music sequencer closed, dropping command");
            return;
        };

        let mut projected = self.projected.lock();
        let base = if self.pending() == 0 {
            self.player.state()
        } else {
            *projected
        };
        let next = project(base, &command);

        self.submitted.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = command_tx.send(command) {
            self.submitted.fetch_sub(1, Ordering::SeqCst);
            warn!(command = %err.0, "Music sequencer stopped, dropping command");
            return;
        }
        *projected = next;
    }

    /// Number of commands fully processed so far
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// Number of submitted commands that have not finished yet
    pub fn pending(&self) -> usize {
        self.submitted
            .load(Ordering::SeqCst)
            .saturating_sub(self.processed())
    }

    /// State the player will be in once the queue drains
    ///
    /// With nothing pending this is the state the player reports. Otherwise
    /// it is projected from the queued commands, assuming they succeed.
    pub fn expected_state(&self) -> PlayerState {
        let projected = self.projected.lock();
        if self.pending() == 0 {
            self.player.state()
        } else {
            *projected
        }
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_none()
    }

    /// Close the command stream
    ///
    /// Commands already queued still run to completion; the consumer stops
    /// afterwards. Returns the consumer task so the owner can await the drain.
    pub fn close(&mut self) -> Option<JoinHandle<()>> {
        self.command_tx.take();
        self.task.take()
    }
}

impl std::fmt::Debug for MusicSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicSequencer")
            .field("player", &self.player.id())
            .field("closed", &self.is_closed())
            .field("pending", &self.pending())
            .field("processed", &self.processed())
            .finish()
    }
}

/// Player state after `command` runs on a player in state `state`
fn project(state: PlayerState, command: &MusicCommand) -> PlayerState {
    match (state, command) {
        (PlayerState::Disposed, _) => PlayerState::Disposed,
        (_, MusicCommand::Play(_)) | (PlayerState::Paused, MusicCommand::Resume) => {
            PlayerState::Playing
        }
        (PlayerState::Playing, MusicCommand::Pause) => PlayerState::Paused,
        (state, _) => state,
    }
}

async fn run(
    player: Arc<dyn AudioPlayer>,
    mut command_rx: mpsc::UnboundedReceiver<MusicCommand>,
    processed: Arc<AtomicUsize>,
) {
    debug!(player = player.id(), "Music sequencer started");

    while let Some(command) = command_rx.recv().await {
        execute(player.as_ref(), &command).await;
        processed.fetch_add(1, Ordering::SeqCst);
    }

    debug!(player = player.id(), "Music sequencer stopped");
}

/// Run one command to completion, swallowing backend failures
async fn execute(player: &dyn AudioPlayer, command: &MusicCommand) {
    debug!(%command, "Executing music command");

    let result = match command {
        MusicCommand::Play(asset) => {
            async {
                player.set_source(asset).await?;
                player.play().await
            }
            .await
        }
        MusicCommand::Pause => player.pause().await,
        MusicCommand::Resume => player.resume().await,
    };

    // Backends fail intermittently mid-transition; the next command may recover
    if let Err(err) = result {
        error!(%command, error = %err, "Music command failed");
    }
}
