/// Audio-related settings exposed as observable signals
use crate::signal::{Signal, WeakSignal};

/// The three audio switches the audio controller reacts to
///
/// Each switch is an independent [`Signal`], so observers can subscribe to
/// them one by one. The bundle is owned by the settings collaborator; the
/// audio controller only keeps a [`WeakSettingsSignal`].
#[derive(Debug, Clone)]
pub struct SettingsSignal {
    /// Global mute (silences music and sound effects)
    pub muted: Signal<bool>,

    /// Background music enabled
    pub music_on: Signal<bool>,

    /// Sound effects enabled
    pub sounds_on: Signal<bool>,
}

impl SettingsSignal {
    /// Create a settings bundle with explicit initial values
    pub fn new(muted: bool, music_on: bool, sounds_on: bool) -> Self {
        Self {
            muted: Signal::new(muted),
            music_on: Signal::new(music_on),
            sounds_on: Signal::new(sounds_on),
        }
    }

    /// Whether both bundles are made of the same signal instances
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.muted.ptr_eq(&other.muted)
            && self.music_on.ptr_eq(&other.music_on)
            && self.sounds_on.ptr_eq(&other.sounds_on)
    }

    /// Non-owning handle to this bundle
    pub fn downgrade(&self) -> WeakSettingsSignal {
        WeakSettingsSignal {
            muted: self.muted.downgrade(),
            music_on: self.music_on.downgrade(),
            sounds_on: self.sounds_on.downgrade(),
        }
    }
}

impl Default for SettingsSignal {
    /// Unmuted, music on, sounds on
    fn default() -> Self {
        Self::new(false, true, true)
    }
}

/// Non-owning handle to a [`SettingsSignal`]
#[derive(Debug, Clone)]
pub struct WeakSettingsSignal {
    muted: WeakSignal<bool>,
    music_on: WeakSignal<bool>,
    sounds_on: WeakSignal<bool>,
}

impl WeakSettingsSignal {
    /// Upgrade to a strong bundle if every signal is still alive
    pub fn upgrade(&self) -> Option<SettingsSignal> {
        Some(SettingsSignal {
            muted: self.muted.upgrade()?,
            music_on: self.music_on.upgrade()?,
            sounds_on: self.sounds_on.upgrade()?,
        })
    }

    /// Whether this handle points at `settings`
    pub fn is(&self, settings: &SettingsSignal) -> bool {
        self.muted.is(&settings.muted)
            && self.music_on.is(&settings.music_on)
            && self.sounds_on.is(&settings.sounds_on)
    }
}
