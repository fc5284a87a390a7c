//! Game Shell Demo Library
//!
//! Headless game shell session over a simulated audio backend.
//!
//! This library exposes the demo components for testing purposes.

pub mod backend;
pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use backend::{SimulatedBackend, SimulatedPlayer};
pub use config::DemoConfig;
pub use error::{DemoError, Result};
pub use session::{run_session, SessionReport};
