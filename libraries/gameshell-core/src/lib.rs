//! Game Shell Core
//!
//! Platform-agnostic types, observable signals, and backend traits shared by
//! every Game Shell crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SfxType`, `PlayerState`, `AppLifecycle`
//! - **Signals**: `Signal<T>` observable values with detachable `Subscription`s,
//!   plus the `SettingsSignal` bundle consumed by the audio controller
//! - **Core Traits**: `AudioBackend`, `AudioPlayer`, `KeyValueStore`
//! - **Error Handling**: Unified `ShellError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use gameshell_core::{AppLifecycle, LifecycleSignal, SettingsSignal};
//!
//! let lifecycle = LifecycleSignal::new(AppLifecycle::Foreground);
//! let settings = SettingsSignal::default();
//!
//! let subscription = lifecycle.subscribe(|state| println!("lifecycle: {state}"));
//! lifecycle.set(AppLifecycle::Background);
//!
//! // Dropping the subscription detaches the listener
//! drop(subscription);
//! assert_eq!(lifecycle.listener_count(), 0);
//! assert!(!settings.muted.get());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod signal;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShellError};
pub use signal::{Signal, Subscription, WeakSignal};
pub use traits::{AudioBackend, AudioPlayer, CompletionCallback, KeyValueStore};
pub use types::{
    AppLifecycle, LifecycleSignal, PlayerState, SettingsSignal, SfxType, Song,
    WeakSettingsSignal,
};
