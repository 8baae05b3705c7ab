//! Commit engine
//!
//! Applies one coherent update cycle. Hook order inside a commit is fixed:
//!
//! ```text
//! drain queue ─► fold state ─► apply props ─► should_update ──false──► stop
//!                                                  │true
//!                                                  ▼
//!                will_update ─► publish ─► render ─► notify ─► did_update ─► callbacks
//! ```
//!
//! The engine's committed triple advances *before* the gate is consulted,
//! so a vetoed commit still moves props/state/context forward even though
//! nothing is rendered or published.

use std::cell::RefCell;
use std::rc::Rc;

use lifecycle_core::{Node, Snapshot};
use lifecycle_event::RenderBus;

use crate::change::{ChangeQueue, PropsUpdate, Updater};
use crate::component::Component;

/// Committed triple for a component type
pub type Committed<C> =
    Snapshot<<C as Component>::Props, <C as Component>::State, <C as Component>::Context>;

/// What a `check_update` call did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Both queues were empty; no hook ran
    Idle,
    /// `should_update` vetoed the render
    Skipped,
    /// The component re-rendered
    Rendered,
}

impl CommitOutcome {
    pub fn rendered(self) -> bool {
        self == CommitOutcome::Rendered
    }
}

/// Ends the commit on the queue when dropped
struct CommitGuard<C: Component> {
    queue: Rc<RefCell<ChangeQueue<C>>>,
}

impl<C: Component> Drop for CommitGuard<C> {
    fn drop(&mut self) {
        self.queue.borrow_mut().finish_commit();
    }
}

/// Queue, committed snapshot, output tree and render subscribers of one component
pub struct CommitEngine<C: Component> {
    queue: Rc<RefCell<ChangeQueue<C>>>,
    current: Committed<C>,
    rendered: Option<Node>,
    rendering: RenderBus<Option<Node>>,
    commits: u64,
}

impl<C: Component> CommitEngine<C> {
    /// Create an engine over `queue`, starting from the constructed snapshot
    pub fn new(queue: Rc<RefCell<ChangeQueue<C>>>, initial: Committed<C>) -> Self {
        Self {
            queue,
            current: initial,
            rendered: None,
            rendering: RenderBus::new(),
            commits: 0,
        }
    }

    /// A fresh state-enqueue handle onto this engine's queue
    pub fn updater(&self) -> Updater<C> {
        Updater::new(self.queue.clone())
    }

    /// Replace the pending props update. Returns true if one was discarded.
    pub fn queue_props(&mut self, update: PropsUpdate<C>) -> bool {
        self.queue.borrow_mut().replace_props(update).is_some()
    }

    /// willMount ─► render ─► notify ─► didMount
    pub fn mount(&mut self, component: &mut C) {
        log::debug!("mount {}", std::any::type_name::<C>());
        component.will_mount();
        self.render(component);
        component.did_mount();
    }

    /// Run one commit cycle if anything is queued
    pub fn check_update(&mut self, component: &mut C) -> CommitOutcome {
        // Bind first so the queue borrow ends before any hook runs
        let drained = self.queue.borrow_mut().begin_commit();
        let Some(drained) = drained else {
            return CommitOutcome::Idle;
        };
        // Settles the queue even if a hook or subscriber panics below
        let guard = CommitGuard {
            queue: self.queue.clone(),
        };

        let old = self.current.clone();

        let mut working = self.current.state.clone();
        let mut callbacks = Vec::new();
        for (index, pending) in drained.state_changes.into_iter().enumerate() {
            log::trace!("fold state change #{} {:?}", index, pending.change);
            working = pending.change.apply(working, &self.current.props);
            if let Some(callback) = pending.callback {
                callbacks.push(callback);
            }
        }
        self.current.state = working;

        if let Some(update) = drained.props_update {
            self.current.props = update.props;
            self.current.context = update.context;
        }

        let next = &self.current;
        if !component.should_update(&next.props, &next.state, &next.context) {
            log::debug!(
                "commit vetoed by should_update, {} callback(s) dropped",
                callbacks.len()
            );
            return CommitOutcome::Skipped;
        }

        component.will_update(&next.props, &next.state, &next.context);

        let base = component.base_mut();
        base.props = self.current.props.clone();
        base.state = self.current.state.clone();
        base.context = self.current.context.clone();

        self.render(component);
        component.did_update(&old.props, &old.state, &old.context);

        drop(guard);
        self.commits += 1;
        log::debug!(
            "commit #{} rendered, firing {} callback(s)",
            self.commits,
            callbacks.len()
        );

        for callback in callbacks {
            callback();
        }
        CommitOutcome::Rendered
    }

    /// Forget the output tree
    pub(crate) fn clear_rendered(&mut self) {
        self.rendered = None;
    }

    fn render(&mut self, component: &C) {
        self.rendered = component.render();
        let notified = self.rendering.notify(&self.rendered);
        log::trace!("rendered, {} subscriber(s) notified", notified);
    }

    pub fn queue(&self) -> std::cell::Ref<'_, ChangeQueue<C>> {
        self.queue.borrow()
    }

    pub fn committed(&self) -> &Committed<C> {
        &self.current
    }

    pub fn rendered(&self) -> Option<&Node> {
        self.rendered.as_ref()
    }

    pub fn rendering(&self) -> &RenderBus<Option<Node>> {
        &self.rendering
    }

    /// Number of rendered commits (mount excluded)
    pub fn commits(&self) -> u64 {
        self.commits
    }
}
