//! Events announcing todo lifecycle changes.

use event_bus::DomainEvent;
use serde::Serialize;

use super::entity::{ActiveTodo, ArchivedTodo, CompletedTodo};
use super::value_objects::{Timestamp, TodoId};

/// Which lifecycle change happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TodoEventKind {
    Created,
    Completed,
    Reopened,
    Archived,
}

impl TodoEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoEventKind::Created => "Created",
            TodoEventKind::Completed => "Completed",
            TodoEventKind::Reopened => "Reopened",
            TodoEventKind::Archived => "Archived",
        }
    }
}

/// A todo lifecycle change, queued by a workflow after it persists the todo.
///
/// Only workflows create these, one per successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoEvent {
    #[serde(rename = "type")]
    kind: TodoEventKind,
    todo_id: TodoId,
    occurred_at: Timestamp,
}

impl TodoEvent {
    pub(crate) fn created(todo: &ActiveTodo) -> Self {
        Self::new(TodoEventKind::Created, todo.id(), todo.created_at())
    }

    pub(crate) fn completed(todo: &CompletedTodo) -> Self {
        Self::new(TodoEventKind::Completed, todo.id(), todo.completed_at())
    }

    pub(crate) fn reopened(todo: &ActiveTodo) -> Self {
        Self::new(TodoEventKind::Reopened, todo.id(), Timestamp::now())
    }

    pub(crate) fn archived(todo: &ArchivedTodo) -> Self {
        Self::new(TodoEventKind::Archived, todo.id(), todo.archived_at())
    }

    fn new(kind: TodoEventKind, todo_id: &TodoId, occurred_at: Timestamp) -> Self {
        Self {
            kind,
            todo_id: todo_id.clone(),
            occurred_at,
        }
    }

    pub fn kind(&self) -> TodoEventKind {
        self.kind
    }

    pub fn todo_id(&self) -> &TodoId {
        &self.todo_id
    }

    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }
}

impl DomainEvent for TodoEvent {
    fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::entity::{archive, complete, create_todo};
    use crate::todo::value_objects::{Priority, Title};

    fn sample() -> ActiveTodo {
        create_todo(
            TodoId::generate(),
            Title::create("Write report").unwrap(),
            None,
            Priority::Low,
        )
    }

    #[test]
    fn events_carry_transition_timestamps() {
        let active = sample();
        let created = TodoEvent::created(&active);
        assert_eq!(created.kind(), TodoEventKind::Created);
        assert_eq!(created.occurred_at(), active.created_at());

        let completed = complete(active);
        let event = TodoEvent::completed(&completed);
        assert_eq!(event.occurred_at(), completed.completed_at());
        assert_eq!(event.todo_id(), completed.id());

        let archived = archive(completed);
        let event = TodoEvent::archived(&archived);
        assert_eq!(event.event_type(), "Archived");
        assert_eq!(event.occurred_at(), archived.archived_at());
    }

    #[test]
    fn serializes_with_type_tag() {
        let active = sample();
        let json = serde_json::to_value(TodoEvent::reopened(&active)).unwrap();

        assert_eq!(json["type"], "Reopened");
        assert_eq!(json["todoId"], active.id().as_str());
        assert!(json["occurredAt"].is_string());
    }
}
