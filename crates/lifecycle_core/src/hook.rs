//! Lifecycle hook names
//!
//! Hooks are identified by their canonical component-lifecycle names
//! (`componentDidMount`, `shouldComponentUpdate`, ...). Those strings are
//! what scenario scripts match on and what golden logs record.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named point in the update cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hook {
    #[serde(rename = "componentWillMount")]
    WillMount,
    #[serde(rename = "componentDidMount")]
    DidMount,
    #[serde(rename = "componentWillReceiveProps")]
    WillReceiveProps,
    #[serde(rename = "shouldComponentUpdate")]
    ShouldUpdate,
    #[serde(rename = "componentWillUpdate")]
    WillUpdate,
    #[serde(rename = "componentDidUpdate")]
    DidUpdate,
    #[serde(rename = "componentWillUnmount")]
    WillUnmount,
}

impl Hook {
    /// Every hook, in the order they can first fire
    pub const ALL: [Hook; 7] = [
        Hook::WillMount,
        Hook::DidMount,
        Hook::WillReceiveProps,
        Hook::ShouldUpdate,
        Hook::WillUpdate,
        Hook::DidUpdate,
        Hook::WillUnmount,
    ];

    /// Canonical hook name
    pub const fn name(self) -> &'static str {
        match self {
            Hook::WillMount => "componentWillMount",
            Hook::DidMount => "componentDidMount",
            Hook::WillReceiveProps => "componentWillReceiveProps",
            Hook::ShouldUpdate => "shouldComponentUpdate",
            Hook::WillUpdate => "componentWillUpdate",
            Hook::DidUpdate => "componentDidUpdate",
            Hook::WillUnmount => "componentWillUnmount",
        }
    }

    /// Whether the hook belongs to an update cycle rather than mount/unmount
    pub const fn is_update(self) -> bool {
        matches!(
            self,
            Hook::WillReceiveProps | Hook::ShouldUpdate | Hook::WillUpdate | Hook::DidUpdate
        )
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hook {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| Error::UnknownHook(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips_through_from_str() {
        for hook in Hook::ALL {
            assert_eq!(hook.name().parse::<Hook>().unwrap(), hook);
        }
    }

    #[test]
    fn test_unknown_hook() {
        let err = "componentDidCatch".parse::<Hook>().unwrap_err();
        assert_eq!(err, Error::UnknownHook("componentDidCatch".into()));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Hook::ShouldUpdate).unwrap();
        assert_eq!(json, "\"shouldComponentUpdate\"");

        let hook: Hook = serde_json::from_str("\"componentDidUpdate\"").unwrap();
        assert_eq!(hook, Hook::DidUpdate);
    }

    #[test]
    fn test_update_phase() {
        assert!(!Hook::WillMount.is_update());
        assert!(!Hook::DidMount.is_update());
        assert!(Hook::WillReceiveProps.is_update());
        assert!(Hook::DidUpdate.is_update());
        assert!(!Hook::WillUnmount.is_update());
    }
}
