//! Recorded values and log entries
//!
//! A log entry carries the hook name plus only the sides of the
//! props/state snapshot that matter for that hook:
//!
//! ```json
//! {"eventName":"componentDidUpdate","params":{"prev":{"props":{"counterExternal":0},"state":{"counterInternal":0}}}}
//! ```

use lifecycle_core::Hook;
use serde::{Deserialize, Serialize};

/// The recorded slice of the scripted component's props
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedProps {
    pub counter_external: u32,
}

impl RecordedProps {
    pub fn new(counter_external: u32) -> Self {
        Self { counter_external }
    }
}

/// The recorded slice of the scripted component's state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedState {
    pub counter_internal: u32,
}

impl RecordedState {
    pub fn new(counter_internal: u32) -> Self {
        Self { counter_internal }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropsState {
    pub props: RecordedProps,
    pub state: RecordedState,
}

impl PropsState {
    pub fn new(props: RecordedProps, state: RecordedState) -> Self {
        Self { props, state }
    }
}

/// Snapshot sides reported with a hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangingValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PropsState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PropsState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PropsState>,
}

impl ChangingValues {
    pub fn current(values: PropsState) -> Self {
        Self {
            current: Some(values),
            ..Self::default()
        }
    }

    pub fn prev(values: PropsState) -> Self {
        Self {
            prev: Some(values),
            ..Self::default()
        }
    }

    pub fn next(values: PropsState) -> Self {
        Self {
            next: Some(values),
            ..Self::default()
        }
    }
}

/// One line of a running log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub event_name: Hook,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ChangingValues>,
}

impl LogEntry {
    pub fn new(event_name: Hook, params: ChangingValues) -> Self {
        Self {
            event_name,
            params: Some(params),
        }
    }

    /// An entry with no snapshot attached
    pub fn bare(event_name: Hook) -> Self {
        Self {
            event_name,
            params: None,
        }
    }
}
