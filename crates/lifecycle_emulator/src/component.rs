//! Component contract - the heart of the emulator
//!
//! A component is a stateful value with a `render` operation and a set of
//! optional lifecycle hooks. Every hook has a default implementation that
//! does nothing, so an implementor only writes the hooks it cares about.
//! A hook left at its default behaves exactly like an absent hook.

use lifecycle_core::Node;

use crate::change::{Merge, Updater};

/// The published `props`/`state`/`context` of a component plus its updater
///
/// The engine overwrites the three fields wholesale on every rendered
/// commit. Components read them but never assign them directly.
pub struct Base<C: Component> {
    pub props: C::Props,
    pub state: C::State,
    pub context: C::Context,
    updater: Updater<C>,
}

impl<C: Component> Base<C> {
    /// Create the base for a freshly constructed component
    pub fn new(props: C::Props, state: C::State, context: C::Context, updater: Updater<C>) -> Self {
        Self {
            props,
            state,
            context,
            updater,
        }
    }

    /// The injected state-enqueue handle
    pub fn updater(&self) -> &Updater<C> {
        &self.updater
    }

    /// Queue a fragment to merge on the next commit
    pub fn set_state(&self, fragment: <C::State as Merge>::Fragment) {
        self.updater.set_state(fragment);
    }

    /// Queue a function of `(working_state, props)` on the next commit
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&C::State, &C::Props) -> C::State + 'static,
    {
        self.updater.update(f);
    }
}

/// The component trait - everything the engine drives implements this
pub trait Component: Sized + 'static {
    /// External input
    type Props: Clone + 'static;
    /// Internal state, mutable only through the change queue
    type State: Clone + Merge + 'static;
    /// Ambient input, treated like props
    type Context: Clone + Default + 'static;

    /// Build the instance. The updater is installed before any hook runs.
    fn construct(props: Self::Props, context: Self::Context, updater: Updater<Self>) -> Self;

    fn base(&self) -> &Base<Self>;

    fn base_mut(&mut self) -> &mut Base<Self>;

    /// Produce the output tree; `None` is a null render
    fn render(&self) -> Option<Node>;

    /// Called once before the first render
    fn will_mount(&mut self) {}

    /// Called once after the first render
    fn did_mount(&mut self) {}

    /// Called with incoming values before they are committed
    fn will_receive_props(&mut self, _next_props: &Self::Props, _next_context: &Self::Context) {}

    /// Gate for the update. Returning false skips render and `did_update`.
    fn should_update(
        &mut self,
        _next_props: &Self::Props,
        _next_state: &Self::State,
        _next_context: &Self::Context,
    ) -> bool {
        true
    }

    /// Called after the gate, before the new values are published
    fn will_update(
        &mut self,
        _next_props: &Self::Props,
        _next_state: &Self::State,
        _next_context: &Self::Context,
    ) {
    }

    /// Called after render with the values from before the commit
    fn did_update(
        &mut self,
        _prev_props: &Self::Props,
        _prev_state: &Self::State,
        _prev_context: &Self::Context,
    ) {
    }

    /// Called when the emulator unmounts the component
    fn will_unmount(&mut self) {}

    /// Convenience accessors
    fn props(&self) -> &Self::Props {
        &self.base().props
    }

    fn state(&self) -> &Self::State {
        &self.base().state
    }

    fn context(&self) -> &Self::Context {
        &self.base().context
    }
}
