//! Scenario script executor
//!
//! The runner plays the parent of a [`Scripted`] component. Every hook the
//! component reports goes through the same path:
//!
//! ```text
//! hook ─► trace ─► observer (if started) ─► matches script[cursor]? ─► action
//! ```
//!
//! Actions enqueue internal state through the component's setter, queue
//! parent-side prop changes, arm recording or stop the scenario. Nothing
//! commits on its own: the caller steps the runner with [`ScriptRunner::poll`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use lifecycle_core::Hook;
use lifecycle_emulator::{Callback, Component, Emulator};

use crate::error::ScriptResult;
use crate::join::Join;
use crate::observer::ScenarioObserver;
use crate::record::{ChangingValues, LogEntry, RecordedProps, RecordedState};
use crate::scenario::Scenario;
use crate::scripted::{HookSink, RecordedSetter, Scripted, ScriptedProps};

/// Action bound to an expected hook
pub type Action = Box<dyn FnOnce(&ScriptContext<'_>)>;

/// One `{ on, action }` step of a script
pub struct Instruction {
    pub on: Hook,
    action: Option<Action>,
}

impl Instruction {
    pub fn new<F>(on: Hook, action: F) -> Self
    where
        F: FnOnce(&ScriptContext<'_>) + 'static,
    {
        Self {
            on,
            action: Some(Box::new(action)),
        }
    }

    /// Whether the action has already run
    pub fn is_spent(&self) -> bool {
        self.action.is_none()
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("on", &self.on)
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Build the fixed instruction list for a scenario
pub fn build_script(scenario: Scenario) -> Vec<Instruction> {
    match scenario {
        Scenario::OnMount => vec![Instruction::new(Hook::DidMount, |ctx| ctx.stop())],
        Scenario::PropsOnly => vec![Instruction::new(Hook::DidMount, |ctx| {
            ctx.start();
            let handle = ctx.handle();
            ctx.set_external(RecordedProps::new(1), move || handle.stop());
        })],
        Scenario::StateOnly => vec![Instruction::new(Hook::DidMount, |ctx| {
            ctx.start();
            let handle = ctx.handle();
            ctx.set_state(|_| RecordedState::new(1), move || handle.stop());
        })],
        Scenario::StateAndPropsAsync => {
            let join = Rc::new(Join::new(2));
            vec![Instruction::new(Hook::DidMount, move |ctx| {
                ctx.start();
                ctx.set_external(RecordedProps::new(1), ctx.finisher(&join));
                ctx.set_state(|_| RecordedState::new(1), ctx.finisher(&join));
            })]
        }
        Scenario::StateThenCallbackProps => vec![Instruction::new(Hook::DidMount, |ctx| {
            ctx.start();
            let handle = ctx.handle();
            ctx.set_state(
                |_| RecordedState::new(1),
                move || {
                    let stopper = handle.clone();
                    handle.set_external(RecordedProps::new(1), move || stopper.stop());
                },
            );
        })],
        Scenario::PropsAndStateInWillReceive => {
            let join = Rc::new(Join::new(2));
            let state_join = join.clone();
            vec![
                Instruction::new(Hook::DidMount, move |ctx| {
                    ctx.start();
                    ctx.set_external(RecordedProps::new(1), ctx.finisher(&join));
                }),
                Instruction::new(Hook::WillReceiveProps, move |ctx| {
                    ctx.set_state(|_| RecordedState::new(1), ctx.finisher(&state_join));
                }),
            ]
        }
    }
}

struct ExternalChange {
    recorded: RecordedProps,
    callback: Callback,
}

/// Runner state reachable from hooks, actions and callbacks
struct Shared {
    this: Weak<Shared>,
    scenario: Scenario,
    started: Cell<bool>,
    completed: Cell<bool>,
    cursor: Cell<usize>,
    script: RefCell<Vec<Instruction>>,
    external: RefCell<Vec<ExternalChange>>,
    trace: RefCell<Vec<Hook>>,
    observer: Rc<dyn ScenarioObserver>,
}

impl Shared {
    fn new(scenario: Scenario, observer: Rc<dyn ScenarioObserver>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            scenario,
            started: Cell::new(scenario.pre_armed()),
            completed: Cell::new(false),
            cursor: Cell::new(0),
            script: RefCell::new(build_script(scenario)),
            external: RefCell::new(Vec::new()),
            trace: RefCell::new(Vec::new()),
            observer,
        })
    }

    fn stop(&self) {
        self.started.set(false);
        if self.completed.replace(true) {
            log::warn!("{}: stop signalled more than once", self.scenario);
            return;
        }
        log::debug!("{}: completed", self.scenario);
        self.observer.completed();
    }

    fn queue_external(&self, recorded: RecordedProps, callback: Callback) {
        self.external
            .borrow_mut()
            .push(ExternalChange { recorded, callback });
    }

    /// Take the action of the instruction under the cursor if `hook` matches it
    fn advance(&self, hook: Hook) -> Option<(usize, Action)> {
        let mut script = self.script.borrow_mut();
        let cursor = self.cursor.get();
        let instruction = script.get_mut(cursor).filter(|i| i.on == hook)?;
        self.cursor.set(cursor + 1);
        instruction.action.take().map(|action| (cursor, action))
    }
}

impl HookSink for Shared {
    fn on_hook(&self, hook: Hook, values: ChangingValues, setter: &RecordedSetter) {
        self.trace.borrow_mut().push(hook);
        if self.started.get() {
            self.observer.log(&LogEntry::new(hook, values));
        }

        if let Some((step, action)) = self.advance(hook) {
            log::debug!("{}: step {} matched {}", self.scenario, step, hook);
            action(&ScriptContext {
                shared: self,
                setter,
            });
        }
    }
}

/// What an action can do
pub struct ScriptContext<'a> {
    shared: &'a Shared,
    setter: &'a RecordedSetter,
}

impl ScriptContext<'_> {
    /// Start forwarding hooks to the observer
    pub fn start(&self) {
        self.shared.started.set(true);
    }

    /// Stop forwarding and signal completion
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Enqueue an internal state change on the scripted component
    pub fn set_state<F, G>(&self, mutate: F, callback: G)
    where
        F: FnOnce(RecordedState) -> RecordedState + 'static,
        G: FnOnce() + 'static,
    {
        self.setter.set(mutate, callback);
    }

    /// Queue a parent-side prop change, applied on the next poll
    pub fn set_external<G>(&self, recorded: RecordedProps, callback: G)
    where
        G: FnOnce() + 'static,
    {
        self.shared.queue_external(recorded, Box::new(callback));
    }

    /// Handle for callbacks that outlive this action
    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle(self.shared.this.clone())
    }

    /// Callback that arrives at `join` and stops the scenario once it completes
    pub fn finisher(&self, join: &Rc<Join>) -> impl FnOnce() + 'static {
        let join = join.clone();
        let handle = self.handle();
        move || {
            if join.arrive() {
                handle.stop();
            }
        }
    }
}

/// Weak handle onto a runner, usable from completion callbacks
#[derive(Clone)]
pub struct RunnerHandle(Weak<Shared>);

impl RunnerHandle {
    pub fn stop(&self) {
        if let Some(shared) = self.0.upgrade() {
            shared.stop();
        }
    }

    pub fn set_external<G>(&self, recorded: RecordedProps, callback: G)
    where
        G: FnOnce() + 'static,
    {
        if let Some(shared) = self.0.upgrade() {
            shared.queue_external(recorded, Box::new(callback));
        }
    }
}

impl fmt::Debug for RunnerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RunnerHandle")
            .field(&self.0.upgrade().map(|shared| shared.scenario))
            .finish()
    }
}

/// Drives one scenario against a fresh scripted component
pub struct ScriptRunner {
    shared: Rc<Shared>,
    emulator: Emulator<Scripted>,
    polls: usize,
}

impl ScriptRunner {
    pub fn new(scenario: Scenario, observer: Rc<dyn ScenarioObserver>) -> Self {
        let shared = Shared::new(scenario, observer);
        let sink: Rc<dyn HookSink> = shared.clone();
        let emulator = Emulator::construct(ScriptedProps::new(RecordedProps::default(), sink));
        log::debug!("{}: runner constructed", scenario);

        Self {
            shared,
            emulator,
            polls: 0,
        }
    }

    pub fn mount(&mut self) -> ScriptResult<()> {
        self.emulator.mount()?;
        Ok(())
    }

    /// One explicit driver step
    ///
    /// Pending parent-side prop changes are folded (last wins) into a
    /// single `update_props`, after which their callbacks fire in order.
    /// Then whatever the component queued is committed.
    pub fn poll(&mut self) -> ScriptResult<()> {
        self.polls += 1;

        let pending = self.shared.external.take();
        if let Some(recorded) = pending.last().map(|change| change.recorded) {
            log::trace!(
                "{}: poll {} applies {} external change(s)",
                self.shared.scenario,
                self.polls,
                pending.len()
            );
            let sink: Rc<dyn HookSink> = self.shared.clone();
            self.emulator
                .update_props(ScriptedProps::new(recorded, sink), None)?;
            for change in pending {
                (change.callback)();
            }
        }

        self.emulator.check_update()?;
        Ok(())
    }

    pub fn scenario(&self) -> Scenario {
        self.shared.scenario
    }

    pub fn is_started(&self) -> bool {
        self.shared.started.get()
    }

    pub fn is_completed(&self) -> bool {
        self.shared.completed.get()
    }

    /// Index of the next expected instruction
    pub fn cursor(&self) -> usize {
        self.shared.cursor.get()
    }

    /// Whether every instruction has been matched
    pub fn is_exhausted(&self) -> bool {
        self.cursor() >= self.shared.script.borrow().len()
    }

    /// Every hook fired so far, recorded or not
    pub fn trace(&self) -> Vec<Hook> {
        self.shared.trace.borrow().clone()
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Parent-side prop changes waiting for the next poll
    pub fn pending_external(&self) -> usize {
        self.shared.external.borrow().len()
    }

    pub fn external(&self) -> RecordedProps {
        self.emulator.component().props().recorded
    }

    pub fn internal(&self) -> RecordedState {
        self.emulator.component().state().recorded
    }

    pub fn emulator(&self) -> &Emulator<Scripted> {
        &self.emulator
    }
}

impl fmt::Debug for ScriptRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("scenario", &self.shared.scenario)
            .field("started", &self.is_started())
            .field("completed", &self.is_completed())
            .field("cursor", &self.cursor())
            .field("polls", &self.polls)
            .finish()
    }
}
