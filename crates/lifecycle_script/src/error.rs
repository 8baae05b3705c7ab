//! Script errors

use lifecycle_emulator::EmulatorError;
use thiserror::Error;

use crate::scenario::Scenario;

/// Errors raised while building, driving or checking a scenario
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Identifier outside the scenario catalogue
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// The scenario never signalled completion
    #[error("scenario {scenario} did not complete within {polls} polls")]
    PollLimit { scenario: Scenario, polls: usize },

    /// Recorded log diverged from the golden fixture
    #[error("scenario {scenario} diverged from its fixture at entry {index}: {detail}")]
    FixtureMismatch {
        scenario: Scenario,
        index: usize,
        detail: String,
    },

    #[error("emulator error: {0}")]
    Emulator(#[from] EmulatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for script operations
pub type ScriptResult<T> = Result<T, ScriptError>;
