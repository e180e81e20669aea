//! Event bus subscribers installed by the server.

use domain::TodoEvent;
use event_bus::{DomainEvent, EventBus, Subscription};

/// Logs every committed todo event.
pub fn log_events(bus: &dyn EventBus<TodoEvent>) -> Subscription {
    bus.subscribe(Box::new(|event: &TodoEvent| {
        tracing::info!(
            event_type = event.event_type(),
            todo_id = %event.todo_id(),
            occurred_at = %event.occurred_at(),
            "todo event"
        );
    }))
}
