//! Emulator facade
//!
//! Constructs a component, wires it to a change queue and commit engine,
//! and exposes the explicit controls (`mount`, `update_props`,
//! `check_update`, `unmount`) plus read access to the latest output tree.

use std::cell::RefCell;
use std::rc::Rc;

use lifecycle_core::{Node, Snapshot};
use lifecycle_event::{RenderBus, Subscription};

use crate::change::{ChangeQueue, PropsUpdate, QueueState, Updater};
use crate::component::Component;
use crate::engine::{CommitEngine, CommitOutcome, Committed};
use crate::error::{EmulatorError, EmulatorResult};

/// Where the emulated component is in its life
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `mount` not called yet
    Constructed,
    Mounted,
    Unmounted,
}

/// A single component under explicit, caller-driven control
///
/// Every instance is fully independent: nothing is shared between two
/// emulators.
pub struct Emulator<C: Component> {
    component: C,
    engine: CommitEngine<C>,
    lifecycle: Lifecycle,
}

impl<C: Component> Emulator<C> {
    /// Construct with the default context
    pub fn construct(props: C::Props) -> Self {
        Self::construct_with_context(props, C::Context::default())
    }

    /// Construct with an explicit initial context
    pub fn construct_with_context(props: C::Props, context: C::Context) -> Self {
        let queue = Rc::new(RefCell::new(ChangeQueue::new()));
        let component = C::construct(props.clone(), context.clone(), Updater::new(queue.clone()));
        let state = component.base().state.clone();
        let engine = CommitEngine::new(queue, Snapshot::new(props, state, context));

        Self {
            component,
            engine,
            lifecycle: Lifecycle::Constructed,
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// A state-enqueue handle onto this component's queue
    pub fn updater(&self) -> Updater<C> {
        self.engine.updater()
    }

    /// Render subscription registry
    pub fn rendering(&self) -> &RenderBus<Option<Node>> {
        self.engine.rendering()
    }

    /// Subscribe to every new output tree
    pub fn subscribe<F>(&self, callback: F) -> Subscription<Option<Node>>
    where
        F: Fn(&Option<Node>) + 'static,
    {
        self.engine.rendering().subscribe(callback)
    }

    /// Latest output tree; `None` before mount or after a null render
    pub fn rendered(&self) -> Option<&Node> {
        self.engine.rendered()
    }

    /// The engine's committed triple
    ///
    /// This can run ahead of the component's published values: a commit
    /// vetoed by `should_update` still advances it.
    pub fn committed(&self) -> &Committed<C> {
        self.engine.committed()
    }

    pub fn queue_state(&self) -> QueueState {
        self.engine.queue().status()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Number of rendered update commits so far
    pub fn commits(&self) -> u64 {
        self.engine.commits()
    }

    /// Run the mount sequence. Must be called exactly once.
    pub fn mount(&mut self) -> EmulatorResult<()> {
        match self.lifecycle {
            Lifecycle::Constructed => {}
            Lifecycle::Mounted => return Err(EmulatorError::AlreadyMounted),
            Lifecycle::Unmounted => return Err(EmulatorError::Unmounted),
        }
        self.engine.mount(&mut self.component);
        self.lifecycle = Lifecycle::Mounted;
        Ok(())
    }

    /// Queue new props (and context), notify `will_receive_props`, then commit
    ///
    /// A `None` context reuses the component's published context, which lags
    /// the committed one after a vetoed commit.
    pub fn update_props(
        &mut self,
        props: C::Props,
        context: Option<C::Context>,
    ) -> EmulatorResult<CommitOutcome> {
        self.ensure_live()?;
        let context = context.unwrap_or_else(|| self.component.base().context.clone());

        let discarded = self.engine.queue_props(PropsUpdate {
            props: props.clone(),
            context: context.clone(),
        });
        if discarded {
            log::debug!("uncommitted props update replaced");
        }

        self.component.will_receive_props(&props, &context);
        self.check_update()
    }

    /// Commit everything queued so far; a no-op when nothing is queued
    pub fn check_update(&mut self) -> EmulatorResult<CommitOutcome> {
        self.ensure_live()?;
        Ok(self.engine.check_update(&mut self.component))
    }

    /// Call `will_unmount` and drop the output tree
    pub fn unmount(&mut self) -> EmulatorResult<()> {
        match self.lifecycle {
            Lifecycle::Mounted => {}
            Lifecycle::Constructed => return Err(EmulatorError::NotMounted),
            Lifecycle::Unmounted => return Err(EmulatorError::Unmounted),
        }
        log::debug!("unmount {}", std::any::type_name::<C>());
        self.component.will_unmount();
        self.engine.clear_rendered();
        self.lifecycle = Lifecycle::Unmounted;
        Ok(())
    }

    fn ensure_live(&self) -> EmulatorResult<()> {
        if self.lifecycle == Lifecycle::Unmounted {
            return Err(EmulatorError::Unmounted);
        }
        Ok(())
    }
}
