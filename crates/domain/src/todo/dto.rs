//! The externally visible todo shape.

use serde::Serialize;

use super::entity::Todo;
use super::state::TodoStatus;
use super::value_objects::{Priority, Timestamp};

/// Flat, serializable view of a [`Todo`].
///
/// Phase-specific timestamps are present only for the phase that has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TodoStatus,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<Timestamp>,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        let details = todo.details();
        let (completed_at, archived_at) = match todo {
            Todo::Active(_) => (None, None),
            Todo::Completed(completed) => (Some(completed.completed_at()), None),
            Todo::Archived(archived) => (None, Some(archived.archived_at())),
        };

        Self {
            id: details.id().to_string(),
            title: details.title().to_string(),
            description: details.description().map(ToString::to_string),
            priority: details.priority(),
            status: todo.status(),
            created_at: details.created_at(),
            completed_at,
            archived_at,
        }
    }
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}
