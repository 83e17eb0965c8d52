//! Workspace-wide error type.
//!
//! Expected conditions — a missing row, a duplicate UUID, an update that
//! matched nothing — are expressed in return values (`Option`, `bool`),
//! not through this enum. `NudgeError` is for real faults: the storage
//! engine failing, unreadable config, malformed descriptor payloads.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, NudgeError>;

#[derive(Debug, Error)]
pub enum NudgeError {
    /// Underlying SQLite engine failure.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A serialized descriptor could not be parsed.
    #[error("descriptor error: {0}")]
    Descriptor(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
