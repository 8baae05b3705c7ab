//! Committed snapshot triple

/// The `(props, state, context)` triple visible to `render` and hooks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot<P, S, C> {
    pub props: P,
    pub state: S,
    pub context: C,
}

impl<P, S, C> Snapshot<P, S, C> {
    pub fn new(props: P, state: S, context: C) -> Self {
        Self {
            props,
            state,
            context,
        }
    }
}
