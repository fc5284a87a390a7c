/// Sound effect tags
use serde::{Deserialize, Serialize};

/// Kind of one-shot sound effect
///
/// Each type maps to one or more candidate files and a fixed volume in the
/// sound effect catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SfxType {
    /// UI button press
    ButtonTap,
    /// Level or puzzle solved
    Congrats,
    /// Something removed from the board
    Erase,
    /// Soft breath-like whoosh
    Huhsh,
    /// Player jump
    Jump,
    /// Double swish, used for transitions
    SwishSwish,
    /// Rejected move or answer
    WrongAnswer,
    /// Short whoosh
    Wssh,
}

impl SfxType {
    /// Every sound effect type
    pub const ALL: [SfxType; 8] = [
        Self::ButtonTap,
        Self::Congrats,
        Self::Erase,
        Self::Huhsh,
        Self::Jump,
        Self::SwishSwish,
        Self::WrongAnswer,
        Self::Wssh,
    ];

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ButtonTap => "button_tap",
            Self::Congrats => "congrats",
            Self::Erase => "erase",
            Self::Huhsh => "huhsh",
            Self::Jump => "jump",
            Self::SwishSwish => "swish_swish",
            Self::WrongAnswer => "wrong_answer",
            Self::Wssh => "wssh",
        }
    }
}

impl std::fmt::Display for SfxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
