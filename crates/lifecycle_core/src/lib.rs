//! # lifecycle_core - Lifecycle Emulator Core
//!
//! Plain value types shared by every other crate in the workspace:
//! - **Output tree**: the lightweight [`Node`] value returned by `render`
//! - **Hooks**: the fixed set of lifecycle hook names
//! - **Snapshots**: the committed `(props, state, context)` triple
//!
//! Nothing in here knows how a commit works. The engine lives in
//! `lifecycle_emulator`, the scenario sequencer in `lifecycle_script`.

pub mod error;
pub mod hook;
pub mod node;
pub mod snapshot;

pub use error::*;
pub use hook::*;
pub use node::*;
pub use snapshot::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::hook::Hook;
    pub use crate::node::{AttrValue, Element, Handler, Node};
    pub use crate::snapshot::Snapshot;
}
