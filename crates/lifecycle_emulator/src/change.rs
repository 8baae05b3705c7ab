//! Change queue - pending state mutations and prop/context updates
//!
//! Mutations are only buffered here. Nothing is applied until the commit
//! engine drains the queue during `check_update`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::component::Component;

/// Completion callback fired after the commit that applied a mutation
pub type Callback = Box<dyn FnOnce()>;

/// Shallow key-wise merge of a partial update into a state value
pub trait Merge: Sized {
    /// Partial value accepted by `set_state`
    type Fragment;

    /// Produce the next state with every key present in `fragment` replaced
    fn merge(self, fragment: Self::Fragment) -> Self;
}

impl Merge for () {
    type Fragment = ();

    fn merge(self, _fragment: ()) -> Self {}
}

impl<K: Ord, V> Merge for BTreeMap<K, V> {
    type Fragment = BTreeMap<K, V>;

    fn merge(mut self, fragment: Self::Fragment) -> Self {
        self.extend(fragment);
        self
    }
}

impl<K: Eq + Hash, V> Merge for HashMap<K, V> {
    type Fragment = HashMap<K, V>;

    fn merge(mut self, fragment: Self::Fragment) -> Self {
        self.extend(fragment);
        self
    }
}

impl Merge for serde_json::Value {
    type Fragment = serde_json::Value;

    /// Objects merge one level deep; any other fragment replaces the value.
    fn merge(self, fragment: Self::Fragment) -> Self {
        match (self, fragment) {
            (serde_json::Value::Object(mut state), serde_json::Value::Object(fragment)) => {
                for (key, value) in fragment {
                    state.insert(key, value);
                }
                serde_json::Value::Object(state)
            }
            (_, fragment) => fragment,
        }
    }
}

/// A single queued state mutation
pub enum StateChange<C: Component> {
    /// Merged into the working state
    Fragment(<C::State as Merge>::Fragment),
    /// Replaces the working state with the result of `f(working_state, props)`
    Compute(Box<dyn FnOnce(&C::State, &C::Props) -> C::State>),
}

impl<C: Component> StateChange<C> {
    /// Apply to the in-flight working state
    pub fn apply(self, working: C::State, props: &C::Props) -> C::State {
        match self {
            StateChange::Fragment(fragment) => working.merge(fragment),
            StateChange::Compute(f) => f(&working, props),
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, StateChange::Fragment(_))
    }
}

impl<C: Component> fmt::Debug for StateChange<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChange::Fragment(_) => f.write_str("StateChange::Fragment"),
            StateChange::Compute(_) => f.write_str("StateChange::Compute"),
        }
    }
}

/// A state mutation together with its optional completion callback
pub struct PendingState<C: Component> {
    pub change: StateChange<C>,
    pub callback: Option<Callback>,
}

/// Incoming props and context, not yet committed
pub struct PropsUpdate<C: Component> {
    pub props: C::Props,
    pub context: C::Context,
}

/// Queue lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueState {
    /// Nothing pending
    Idle,
    /// Mutations waiting for the next commit
    QueuedUncommitted,
    /// A commit is folding a drained batch
    Committing,
}

/// Everything taken out of the queue for one commit
pub struct Drained<C: Component> {
    pub state_changes: Vec<PendingState<C>>,
    pub props_update: Option<PropsUpdate<C>>,
}

/// Two append-only buffers plus a drain
pub struct ChangeQueue<C: Component> {
    state_changes: Vec<PendingState<C>>,
    props_update: Option<PropsUpdate<C>>,
    status: QueueState,
}

impl<C: Component> ChangeQueue<C> {
    pub fn new() -> Self {
        Self {
            state_changes: Vec::new(),
            props_update: None,
            status: QueueState::Idle,
        }
    }

    /// Append a state mutation (FIFO)
    pub fn push_state(&mut self, pending: PendingState<C>) {
        self.state_changes.push(pending);
        self.mark_queued();
    }

    /// Replace the pending prop/context update, returning the one discarded
    pub fn replace_props(&mut self, update: PropsUpdate<C>) -> Option<PropsUpdate<C>> {
        let discarded = self.props_update.replace(update);
        self.mark_queued();
        discarded
    }

    /// Take everything pending. Returns `None` when both buffers are empty.
    pub fn begin_commit(&mut self) -> Option<Drained<C>> {
        if self.is_empty() {
            return None;
        }
        self.status = QueueState::Committing;
        Some(Drained {
            state_changes: std::mem::take(&mut self.state_changes),
            props_update: self.props_update.take(),
        })
    }

    /// Leave the committing state; anything enqueued meanwhile stays queued
    pub fn finish_commit(&mut self) {
        self.status = if self.is_empty() {
            QueueState::Idle
        } else {
            QueueState::QueuedUncommitted
        };
    }

    pub fn is_empty(&self) -> bool {
        self.state_changes.is_empty() && self.props_update.is_none()
    }

    pub fn pending_state_changes(&self) -> usize {
        self.state_changes.len()
    }

    pub fn has_props_update(&self) -> bool {
        self.props_update.is_some()
    }

    pub fn status(&self) -> QueueState {
        self.status
    }

    fn mark_queued(&mut self) {
        if self.status == QueueState::Idle {
            self.status = QueueState::QueuedUncommitted;
        }
    }
}

impl<C: Component> Default for ChangeQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The state-enqueue handle injected into every component
///
/// Enqueuing never commits. The next `check_update` (directly or through
/// `update_props`) folds everything queued so far.
pub struct Updater<C: Component> {
    queue: Rc<RefCell<ChangeQueue<C>>>,
}

impl<C: Component> Updater<C> {
    pub(crate) fn new(queue: Rc<RefCell<ChangeQueue<C>>>) -> Self {
        Self { queue }
    }

    /// Queue a mutation with an optional completion callback
    pub fn enqueue(&self, change: StateChange<C>, callback: Option<Callback>) {
        log::trace!("enqueue {:?} (callback: {})", change, callback.is_some());
        self.queue
            .borrow_mut()
            .push_state(PendingState { change, callback });
    }

    /// Queue a fragment to merge
    pub fn set_state(&self, fragment: <C::State as Merge>::Fragment) {
        self.enqueue(StateChange::Fragment(fragment), None);
    }

    /// Queue a fragment, calling `callback` once it has been rendered
    pub fn set_state_then<F>(&self, fragment: <C::State as Merge>::Fragment, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.enqueue(StateChange::Fragment(fragment), Some(Box::new(callback)));
    }

    /// Queue a function of `(working_state, props)`
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&C::State, &C::Props) -> C::State + 'static,
    {
        self.enqueue(StateChange::Compute(Box::new(f)), None);
    }

    /// Queue a function of `(working_state, props)` with a completion callback
    pub fn update_then<F, G>(&self, f: F, callback: G)
    where
        F: FnOnce(&C::State, &C::Props) -> C::State + 'static,
        G: FnOnce() + 'static,
    {
        self.enqueue(StateChange::Compute(Box::new(f)), Some(Box::new(callback)));
    }

    /// Number of state mutations waiting for a commit
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending_state_changes()
    }
}

impl<C: Component> Clone for Updater<C> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<C: Component> fmt::Debug for Updater<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.pending())
            .finish()
    }
}
