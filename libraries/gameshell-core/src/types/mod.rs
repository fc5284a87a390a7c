mod lifecycle;
mod player_state;
mod settings;
mod sfx;
mod song;

pub use lifecycle::{AppLifecycle, LifecycleSignal};
pub use player_state::PlayerState;
pub use settings::{SettingsSignal, WeakSettingsSignal};
pub use sfx::SfxType;
pub use song::Song;
