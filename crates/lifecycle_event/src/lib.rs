//! # lifecycle_event - Render Subscriptions
//!
//! Synchronous observer registry used to announce every new output tree:
//! - Registration order is notification order
//! - The same callback may be registered more than once
//! - Unsubscribing (even from inside a callback) affects later
//!   notifications only

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Subscriber callback type
pub type Callback<T> = Rc<dyn Fn(&T)>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

struct Registry<T: ?Sized> {
    subscribers: Vec<(SubscriberId, Callback<T>)>,
    next_subscriber_id: u64,
}

impl<T: ?Sized> Registry<T> {
    fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }
}

/// Registry of render observers
///
/// Cloning yields another handle to the same registry.
pub struct RenderBus<T: ?Sized> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized> RenderBus<T> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                subscribers: Vec::new(),
                next_subscriber_id: 1,
            })),
        }
    }

    /// Register a callback, returning the handle that removes it
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = SubscriberId(registry.next_subscriber_id);
        registry.next_subscriber_id += 1;
        let callback: Callback<T> = Rc::new(callback);
        registry.subscribers.push((id, callback));
        log::trace!("render subscriber {:?} registered", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Remove a subscriber; unknown ids are ignored
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.borrow_mut().remove(id)
    }

    /// Call every subscriber with `value`, returning how many were called
    pub fn notify(&self, value: &T) -> usize {
        // Snapshot first so callbacks may (un)subscribe without a borrow conflict
        let callbacks: Vec<Callback<T>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in &callbacks {
            callback(value);
        }
        callbacks.len()
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().subscribers.is_empty()
    }
}

impl<T: ?Sized> Clone for RenderBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Default for RenderBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for RenderBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderBus")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle returned by [`RenderBus::subscribe`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription<T: ?Sized> {
    id: SubscriberId,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T: ?Sized> Subscription<T> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove the callback. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{RenderBus, SubscriberId, Subscription};
}
