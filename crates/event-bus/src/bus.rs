//! Publish/subscribe fan-out.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// A subscriber callback.
pub type Handler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Delivers events to every current subscriber.
///
/// Publishing is fire-and-forget: handlers run synchronously, in
/// subscription order, on the publishing thread.
pub trait EventBus<E>: Send + Sync {
    /// Delivers `event` to every current subscriber.
    fn publish(&self, event: &E);

    /// Registers `handler`. The returned [`Subscription`] removes it again.
    fn subscribe(&self, handler: Handler<E>) -> Subscription;
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle keeps the handler registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    /// Creates a subscription that runs `cancel` when unsubscribed.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Removes the handler from the bus.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, Arc<dyn Fn(&E) + Send + Sync>)>,
}

/// In-process event bus.
///
/// Clones share the same subscriber list.
pub struct InMemoryEventBus<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> InMemoryEventBus<E> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Returns the number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }
}

impl<E> Default for InMemoryEventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryEventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for InMemoryEventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> EventBus<E> for InMemoryEventBus<E> {
    fn publish(&self, event: &E) {
        // Snapshot so handlers may subscribe or unsubscribe while being called.
        let handlers: Vec<_> = lock(&self.registry)
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    fn subscribe(&self, handler: Handler<E>) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Arc::from(handler)));
            id
        };

        let registry: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).handlers.retain(|(hid, _)| *hid != id);
            }
        })
    }
}

fn lock<E>(registry: &Mutex<Registry<E>>) -> MutexGuard<'_, Registry<E>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
