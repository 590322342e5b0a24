//! Presentation-facing controller pairing a store with its data file.

/// Session configuration.
pub mod config;
/// Session handle and error type.
pub mod handle;

pub use config::SessionConfig;
pub use handle::{Session, SessionError};
