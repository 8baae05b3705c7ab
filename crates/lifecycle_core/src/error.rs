//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hook name outside the lifecycle contract
    #[error("Unknown lifecycle hook: {0}")]
    UnknownHook(String),
}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;
