//! Explicit audio policy state

use gameshell_core::AppLifecycle;
use serde::{Deserialize, Serialize};

/// Inputs the audio controller's policy is evaluated against
///
/// Mirrors the attached settings and lifecycle signals. Until settings are
/// attached everything is off, so no sound plays before the shell is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioState {
    /// Global mute
    pub muted: bool,

    /// Background music enabled
    pub music_on: bool,

    /// Sound effects enabled
    pub sounds_on: bool,

    /// Last reported lifecycle state
    pub lifecycle: AppLifecycle,
}

impl AudioState {
    /// Whether background music should be audible
    ///
    /// | muted | music on | lifecycle          | music   |
    /// |-------|----------|--------------------|---------|
    /// | true  | *        | *                  | stopped |
    /// | false | true     | foreground         | playing |
    /// | false | true     | background/hidden  | stopped |
    /// | false | false    | *                  | stopped |
    pub fn music_audible(&self) -> bool {
        !self.muted && self.music_on && !self.lifecycle.suspends_audio()
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self {
            muted: true,
            music_on: false,
            sounds_on: false,
            lifecycle: AppLifecycle::Foreground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(muted: bool, music_on: bool, lifecycle: AppLifecycle) -> AudioState {
        AudioState {
            muted,
            music_on,
            sounds_on: true,
            lifecycle,
        }
    }

    #[test]
    fn default_state_is_silent() {
        assert!(!AudioState::default().music_audible());
    }

    #[test]
    fn policy_table() {
        use AppLifecycle::{Background, Foreground, Hidden, Inactive};

        assert!(!state(true, true, Foreground).music_audible());
        assert!(!state(true, false, Background).music_audible());
        assert!(state(false, true, Foreground).music_audible());
        assert!(state(false, true, Inactive).music_audible());
        assert!(!state(false, true, Background).music_audible());
        assert!(!state(false, true, Hidden).music_audible());
        assert!(!state(false, false, Foreground).music_audible());
    }
}
