//! Scenario catalogue

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// A named, fixed script of expected hooks and actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Mount only; recording starts before the first hook
    OnMount,
    /// One parent-side prop change
    PropsOnly,
    /// One internal state change
    StateOnly,
    /// Prop change and state change racing to complete
    StateAndPropsAsync,
    /// State change whose callback triggers a prop change
    StateThenCallbackProps,
    /// Prop change that enqueues state from `componentWillReceiveProps`
    PropsAndStateInWillReceive,
}

impl Scenario {
    /// Every scenario, in host order
    pub const ALL: [Scenario; 6] = [
        Scenario::OnMount,
        Scenario::PropsOnly,
        Scenario::StateOnly,
        Scenario::StateAndPropsAsync,
        Scenario::StateThenCallbackProps,
        Scenario::PropsAndStateInWillReceive,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Scenario::OnMount => "OnMount",
            Scenario::PropsOnly => "PropsOnly",
            Scenario::StateOnly => "StateOnly",
            Scenario::StateAndPropsAsync => "StateAndPropsAsync",
            Scenario::StateThenCallbackProps => "StateThenCallbackProps",
            Scenario::PropsAndStateInWillReceive => "PropsAndStateInWillReceive",
        }
    }

    /// The scenario the host runs after this one
    pub const fn next(self) -> Option<Scenario> {
        match self {
            Scenario::OnMount => Some(Scenario::PropsOnly),
            Scenario::PropsOnly => Some(Scenario::StateOnly),
            Scenario::StateOnly => Some(Scenario::StateAndPropsAsync),
            Scenario::StateAndPropsAsync => Some(Scenario::StateThenCallbackProps),
            Scenario::StateThenCallbackProps => Some(Scenario::PropsAndStateInWillReceive),
            Scenario::PropsAndStateInWillReceive => None,
        }
    }

    /// Whether recording is armed before any hook fires
    pub const fn pre_armed(self) -> bool {
        matches!(self, Scenario::OnMount)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| ScriptError::UnknownScenario(s.to_string()))
    }
}
