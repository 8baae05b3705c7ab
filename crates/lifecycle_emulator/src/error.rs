//! Emulator errors

use thiserror::Error;

/// Misuse of the emulator controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmulatorError {
    #[error("component is already mounted")]
    AlreadyMounted,

    #[error("component has not been mounted")]
    NotMounted,

    #[error("component has been unmounted")]
    Unmounted,
}

/// Result type for emulator controls
pub type EmulatorResult<T> = Result<T, EmulatorError>;
