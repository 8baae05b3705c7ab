//! # lifecycle_script - Scenario Script Executor
//!
//! Drives a scripted component through named scenarios on top of the
//! lifecycle emulator:
//! - **Scripted**: a component that reports every hook with its values
//! - **ScriptRunner**: matches hooks against a script and runs actions
//! - **Driver**: mount, then poll until the scenario signals completion
//! - **Fixtures**: golden running logs, one JSON file per scenario
//!
//! ```ignore
//! use lifecycle_script::prelude::*;
//!
//! let report = drive(Scenario::PropsOnly, DEFAULT_MAX_POLLS)?;
//! Fixture::load(dir, Scenario::PropsOnly)?.check(&report.log)?;
//! ```

pub mod driver;
pub mod error;
pub mod fixture;
pub mod join;
pub mod observer;
pub mod record;
pub mod runner;
pub mod scenario;
pub mod scripted;

pub use driver::{drive, drive_runner, RunReport, ScenarioHost, DEFAULT_MAX_POLLS};
pub use error::{ScriptError, ScriptResult};
pub use fixture::Fixture;
pub use join::Join;
pub use observer::{LogCollector, ScenarioObserver};
pub use record::{ChangingValues, LogEntry, PropsState, RecordedProps, RecordedState};
pub use runner::{build_script, Action, Instruction, RunnerHandle, ScriptContext, ScriptRunner};
pub use scenario::Scenario;
pub use scripted::{HookSink, RecordedSetter, Scripted, ScriptedPatch, ScriptedProps, ScriptedState};

/// Prelude
pub mod prelude {
    pub use crate::driver::{drive, RunReport, ScenarioHost, DEFAULT_MAX_POLLS};
    pub use crate::error::{ScriptError, ScriptResult};
    pub use crate::fixture::Fixture;
    pub use crate::observer::{LogCollector, ScenarioObserver};
    pub use crate::record::{ChangingValues, LogEntry, PropsState, RecordedProps, RecordedState};
    pub use crate::runner::ScriptRunner;
    pub use crate::scenario::Scenario;
    pub use lifecycle_core::Hook;
}
