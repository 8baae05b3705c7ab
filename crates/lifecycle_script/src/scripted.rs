//! The scripted component
//!
//! A component whose only job is to report every hook it receives, with
//! the recorded props/state sides relevant to that hook, to a sink. The
//! sink gets a [`RecordedSetter`] so it can enqueue state in response.

use std::fmt;
use std::rc::Rc;

use lifecycle_core::{Hook, Node};
use lifecycle_emulator::{Base, Component, Merge, Updater};

use crate::record::{ChangingValues, PropsState, RecordedProps, RecordedState};

/// Receives every hook the scripted component fires
pub trait HookSink {
    fn on_hook(&self, hook: Hook, values: ChangingValues, setter: &RecordedSetter);
}

#[derive(Clone)]
pub struct ScriptedProps {
    pub recorded: RecordedProps,
    pub sink: Rc<dyn HookSink>,
}

impl ScriptedProps {
    pub fn new(recorded: RecordedProps, sink: Rc<dyn HookSink>) -> Self {
        Self { recorded, sink }
    }
}

impl fmt::Debug for ScriptedProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedProps")
            .field("recorded", &self.recorded)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptedState {
    pub recorded: RecordedState,
}

/// Partial update of [`ScriptedState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedPatch {
    pub recorded: Option<RecordedState>,
}

impl Merge for ScriptedState {
    type Fragment = ScriptedPatch;

    fn merge(mut self, patch: ScriptedPatch) -> Self {
        if let Some(recorded) = patch.recorded {
            self.recorded = recorded;
        }
        self
    }
}

/// State-enqueue function handed to script actions
///
/// Mutations run over the recorded state accumulated so far in the commit.
#[derive(Clone, Debug)]
pub struct RecordedSetter {
    updater: Updater<Scripted>,
}

impl RecordedSetter {
    pub fn new(updater: Updater<Scripted>) -> Self {
        Self { updater }
    }

    /// Queue `mutate`, calling `callback` once the change has been rendered
    pub fn set<F, G>(&self, mutate: F, callback: G)
    where
        F: FnOnce(RecordedState) -> RecordedState + 'static,
        G: FnOnce() + 'static,
    {
        self.updater.update_then(
            move |state: &ScriptedState, _: &ScriptedProps| ScriptedState {
                recorded: mutate(state.recorded),
            },
            callback,
        );
    }
}

pub struct Scripted {
    base: Base<Self>,
}

impl Scripted {
    fn published(&self) -> PropsState {
        PropsState::new(self.props().recorded, self.state().recorded)
    }

    fn report(&self, hook: Hook, values: ChangingValues) {
        log::trace!("{} {:?}", hook, values);
        let setter = RecordedSetter::new(self.base.updater().clone());
        self.props().sink.on_hook(hook, values, &setter);
    }
}

impl Component for Scripted {
    type Props = ScriptedProps;
    type State = ScriptedState;
    type Context = ();

    fn construct(props: ScriptedProps, context: (), updater: Updater<Self>) -> Self {
        Self {
            base: Base::new(props, ScriptedState::default(), context, updater),
        }
    }

    fn base(&self) -> &Base<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<Self> {
        &mut self.base
    }

    fn render(&self) -> Option<Node> {
        Some(Node::element("pre").with_text("Something here?"))
    }

    fn will_mount(&mut self) {
        self.report(Hook::WillMount, ChangingValues::current(self.published()));
    }

    fn did_mount(&mut self) {
        self.report(Hook::DidMount, ChangingValues::current(self.published()));
    }

    fn will_receive_props(&mut self, next: &ScriptedProps, _: &()) {
        let next = PropsState::new(next.recorded, self.state().recorded);
        self.report(Hook::WillReceiveProps, ChangingValues::next(next));
    }

    fn should_update(&mut self, props: &ScriptedProps, state: &ScriptedState, _: &()) -> bool {
        let next = PropsState::new(props.recorded, state.recorded);
        self.report(Hook::ShouldUpdate, ChangingValues::next(next));
        true
    }

    fn will_update(&mut self, props: &ScriptedProps, state: &ScriptedState, _: &()) {
        let next = PropsState::new(props.recorded, state.recorded);
        self.report(Hook::WillUpdate, ChangingValues::next(next));
    }

    fn did_update(&mut self, props: &ScriptedProps, state: &ScriptedState, _: &()) {
        let prev = PropsState::new(props.recorded, state.recorded);
        self.report(Hook::DidUpdate, ChangingValues::prev(prev));
    }

    fn will_unmount(&mut self) {
        self.report(Hook::WillUnmount, ChangingValues::current(self.published()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_emulator::Emulator;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        hooks: RefCell<Vec<(Hook, ChangingValues)>>,
    }

    impl HookSink for Recording {
        fn on_hook(&self, hook: Hook, values: ChangingValues, setter: &RecordedSetter) {
            if hook == Hook::DidMount {
                setter.set(
                    |recorded| RecordedState::new(recorded.counter_internal + 5),
                    || {},
                );
            }
            self.hooks.borrow_mut().push((hook, values));
        }
    }

    fn values(external: u32, internal: u32) -> PropsState {
        PropsState::new(RecordedProps::new(external), RecordedState::new(internal))
    }

    #[test]
    fn test_reports_relevant_sides() {
        let sink = Rc::new(Recording::default());
        let mut emulator =
            Emulator::<Scripted>::construct(ScriptedProps::new(RecordedProps::new(0), sink.clone()));

        emulator.mount().unwrap();
        emulator.check_update().unwrap();
        emulator
            .update_props(ScriptedProps::new(RecordedProps::new(2), sink.clone()), None)
            .unwrap();
        emulator.unmount().unwrap();

        let hooks = sink.hooks.borrow();
        let expected = vec![
            (Hook::WillMount, ChangingValues::current(values(0, 0))),
            (Hook::DidMount, ChangingValues::current(values(0, 0))),
            (Hook::ShouldUpdate, ChangingValues::next(values(0, 5))),
            (Hook::WillUpdate, ChangingValues::next(values(0, 5))),
            (Hook::DidUpdate, ChangingValues::prev(values(0, 0))),
            (Hook::WillReceiveProps, ChangingValues::next(values(2, 5))),
            (Hook::ShouldUpdate, ChangingValues::next(values(2, 5))),
            (Hook::WillUpdate, ChangingValues::next(values(2, 5))),
            (Hook::DidUpdate, ChangingValues::prev(values(0, 5))),
            (Hook::WillUnmount, ChangingValues::current(values(2, 5))),
        ];
        assert_eq!(*hooks, expected);
    }

    #[test]
    fn test_renders_placeholder() {
        let sink = Rc::new(Recording::default());
        let mut emulator =
            Emulator::<Scripted>::construct(ScriptedProps::new(RecordedProps::default(), sink));
        emulator.mount().unwrap();

        let rendered = emulator.rendered().unwrap();
        assert_eq!(rendered.tag(), Some("pre"));
        assert_eq!(rendered.text_content(), "Something here?");
    }
}
