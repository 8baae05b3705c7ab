//! # lifecycle_emulator - Component Lifecycle Emulator
//!
//! Renderer-free harness that drives a stateful component through its
//! lifecycle under explicit stepping:
//! - **Change queue**: buffered state mutations and prop/context updates
//! - **Commit engine**: folds the queue, gates, runs hooks, re-renders
//! - **Facade**: construct, `mount`, `update_props`, `check_update`
//!
//! Nothing is batched implicitly. State enqueued by a component only takes
//! effect on the next `check_update` the caller makes.
//!
//! ```ignore
//! use lifecycle_emulator::prelude::*;
//!
//! let mut emulator = Emulator::<Counter>::construct(CounterProps::default());
//! emulator.mount()?;
//! emulator.updater().set_state(CounterFragment::count(1));
//! emulator.check_update()?;
//! ```

pub mod change;
pub mod component;
pub mod emulator;
pub mod engine;
pub mod error;

pub use change::{Callback, ChangeQueue, Merge, PendingState, PropsUpdate, QueueState, StateChange, Updater};
pub use component::{Base, Component};
pub use emulator::{Emulator, Lifecycle};
pub use engine::{CommitEngine, CommitOutcome, Committed};
pub use error::{EmulatorError, EmulatorResult};

/// Prelude
pub mod prelude {
    pub use crate::change::{Merge, QueueState, StateChange, Updater};
    pub use crate::component::{Base, Component};
    pub use crate::emulator::{Emulator, Lifecycle};
    pub use crate::engine::CommitOutcome;
    pub use crate::error::{EmulatorError, EmulatorResult};
    pub use lifecycle_core::prelude::*;
}
