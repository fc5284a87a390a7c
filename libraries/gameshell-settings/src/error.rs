/// Settings-specific errors
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `SettingsError`
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Settings and progress error types
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The backing key-value store failed
    #[error("Store error: {0}")]
    Store(#[from] gameshell_core::ShellError),

    /// Loading exceeded its time bound
    #[error("Loading timed out after {0:?}")]
    Timeout(Duration),

    /// A stored or requested value is out of range
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Key the value belongs to
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl SettingsError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<SettingsError> for gameshell_core::ShellError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Store(inner) => inner,
            SettingsError::Timeout(after) => Self::Timeout(after),
            other @ SettingsError::InvalidValue { .. } => Self::invalid_input(other.to_string()),
        }
    }
}
