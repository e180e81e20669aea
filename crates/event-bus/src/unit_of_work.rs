//! Buffered event emission scoped to one logical operation.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bus::EventBus;
use crate::event::DomainEvent;

/// Buffers events produced by a workflow until [`UnitOfWork::commit`].
///
/// Workflows only append. Nothing reaches the bus until the owner commits,
/// so persisting state and announcing it fail independently. Clones are
/// handles onto the same pending list, which lets a lazily-run effect append
/// to the unit of work its caller holds.
pub struct UnitOfWork<E> {
    pending: Arc<Mutex<Vec<E>>>,
    bus: Arc<dyn EventBus<E>>,
}

impl<E: DomainEvent> UnitOfWork<E> {
    /// Creates an empty unit of work publishing to `bus`.
    pub fn new(bus: Arc<dyn EventBus<E>>) -> Self {
        Self {
            pending: Arc::new(Mutex::new(Vec::new())),
            bus,
        }
    }

    /// Appends an event to the pending list.
    pub fn push(&self, event: E) {
        tracing::trace!(event_type = event.event_type(), "event queued");
        self.lock().push(event);
    }

    /// Returns a copy of the pending events, oldest first.
    pub fn pending(&self) -> Vec<E> {
        self.lock().clone()
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Publishes every pending event in append order, then clears the list.
    ///
    /// Returns the number of events published. Events appended by a handler
    /// during the commit stay pending for the next commit.
    #[tracing::instrument(skip(self))]
    pub fn commit(&self) -> usize {
        let events = std::mem::take(&mut *self.lock());

        for event in &events {
            self.bus.publish(event);
            metrics::counter!("domain_events_published_total", "event_type" => event.event_type())
                .increment(1);
        }

        tracing::debug!(count = events.len(), "unit of work committed");
        events.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<E>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Clone for UnitOfWork<E> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
            bus: Arc::clone(&self.bus),
        }
    }
}

impl<E> fmt::Debug for UnitOfWork<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending = self
            .pending
            .lock()
            .map(|events| events.len())
            .unwrap_or_default();
        f.debug_struct("UnitOfWork")
            .field("pending", &pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InMemoryEventBus;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestEvent {
        Opened(u32),
        Closed(u32),
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Opened(_) => "Opened",
                TestEvent::Closed(_) => "Closed",
            }
        }
    }

    fn setup() -> (
        InMemoryEventBus<TestEvent>,
        UnitOfWork<TestEvent>,
        Arc<Mutex<Vec<TestEvent>>>,
    ) {
        let bus: InMemoryEventBus<TestEvent> = InMemoryEventBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        // Handler stays registered for the lifetime of the bus.
        let _subscription = bus.subscribe(Box::new(move |event: &TestEvent| {
            sink.lock().unwrap().push(event.clone());
        }));
        let uow = UnitOfWork::new(Arc::new(bus.clone()));
        (bus, uow, received)
    }

    #[test]
    fn nothing_is_delivered_before_commit() {
        let (_bus, uow, received) = setup();

        uow.push(TestEvent::Opened(1));
        uow.push(TestEvent::Closed(1));

        assert_eq!(uow.len(), 2);
        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn commit_delivers_in_order_and_clears() {
        let (_bus, uow, received) = setup();

        uow.push(TestEvent::Opened(1));
        uow.push(TestEvent::Closed(1));
        uow.push(TestEvent::Opened(2));

        assert_eq!(uow.commit(), 3);
        assert!(uow.is_empty());
        assert_eq!(
            *received.lock().unwrap(),
            vec![
                TestEvent::Opened(1),
                TestEvent::Closed(1),
                TestEvent::Opened(2)
            ]
        );

        // A second commit has nothing left to publish.
        assert_eq!(uow.commit(), 0);
        assert_eq!(received.lock().unwrap().len(), 3);
    }

    #[test]
    fn clones_share_pending_events() {
        let (_bus, uow, _received) = setup();
        let handle = uow.clone();

        handle.push(TestEvent::Opened(9));

        assert_eq!(uow.pending(), vec![TestEvent::Opened(9)]);
    }

    #[test]
    fn commit_reaches_every_subscriber() {
        let (bus, uow, received) = setup();
        let second = Arc::new(Mutex::new(0usize));
        let counter = second.clone();
        let _subscription = bus.subscribe(Box::new(move |_: &TestEvent| {
            *counter.lock().unwrap() += 1;
        }));

        uow.push(TestEvent::Opened(1));
        uow.commit();

        assert_eq!(received.lock().unwrap().len(), 1);
        assert_eq!(*second.lock().unwrap(), 1);
    }
}
