/// Application lifecycle states
use crate::signal::Signal;
use serde::{Deserialize, Serialize};

/// Coarse application lifecycle state, as reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppLifecycle {
    /// Visible and receiving input
    #[default]
    Foreground,

    /// Not visible; the app keeps running
    Background,

    /// Detached from any view (about to be torn down)
    Detached,

    /// Hidden, e.g. minimized or covered
    Hidden,

    /// Visible but not receiving input (transitional)
    Inactive,
}

impl AppLifecycle {
    /// Whether audio must be silenced in this state
    ///
    /// `Inactive` is transitional and keeps audio as it is.
    #[must_use]
    pub fn suspends_audio(&self) -> bool {
        matches!(self, Self::Background | Self::Detached | Self::Hidden)
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
            Self::Detached => "detached",
            Self::Hidden => "hidden",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for AppLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable lifecycle state owned by the host integration
pub type LifecycleSignal = Signal<AppLifecycle>;
