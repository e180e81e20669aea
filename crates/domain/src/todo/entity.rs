//! The todo entity and its lifecycle transitions.
//!
//! Each lifecycle phase is its own struct, so a transition can only be called
//! on a todo in a legal source state and only yields fields legal in the
//! destination. [`Todo`] is the sum of the three phases.

use std::ops::Deref;

use store::Keyed;

use super::state::TodoStatus;
use super::value_objects::{Description, Priority, Timestamp, Title, TodoId};

/// Fields shared by every lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDetails {
    id: TodoId,
    title: Title,
    description: Option<Description>,
    priority: Priority,
    created_at: Timestamp,
}

impl TodoDetails {
    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// A todo that is still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTodo {
    details: TodoDetails,
}

/// A todo that has been done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTodo {
    details: TodoDetails,
    completed_at: Timestamp,
}

impl CompletedTodo {
    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }
}

/// A todo that has been put away for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedTodo {
    details: TodoDetails,
    archived_at: Timestamp,
}

impl ArchivedTodo {
    pub fn archived_at(&self) -> Timestamp {
        self.archived_at
    }
}

impl Deref for ActiveTodo {
    type Target = TodoDetails;

    fn deref(&self) -> &TodoDetails {
        &self.details
    }
}

impl Deref for CompletedTodo {
    type Target = TodoDetails;

    fn deref(&self) -> &TodoDetails {
        &self.details
    }
}

impl Deref for ArchivedTodo {
    type Target = TodoDetails;

    fn deref(&self) -> &TodoDetails {
        &self.details
    }
}

/// A todo in any lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Todo {
    Active(ActiveTodo),
    Completed(CompletedTodo),
    Archived(ArchivedTodo),
}

impl Todo {
    /// Returns the fields shared by every phase.
    pub fn details(&self) -> &TodoDetails {
        match self {
            Todo::Active(todo) => &todo.details,
            Todo::Completed(todo) => &todo.details,
            Todo::Archived(todo) => &todo.details,
        }
    }

    pub fn status(&self) -> TodoStatus {
        match self {
            Todo::Active(_) => TodoStatus::Active,
            Todo::Completed(_) => TodoStatus::Completed,
            Todo::Archived(_) => TodoStatus::Archived,
        }
    }

    pub fn id(&self) -> &TodoId {
        self.details().id()
    }

    pub fn created_at(&self) -> Timestamp {
        self.details().created_at()
    }
}

impl From<ActiveTodo> for Todo {
    fn from(todo: ActiveTodo) -> Self {
        Todo::Active(todo)
    }
}

impl From<CompletedTodo> for Todo {
    fn from(todo: CompletedTodo) -> Self {
        Todo::Completed(todo)
    }
}

impl From<ArchivedTodo> for Todo {
    fn from(todo: ArchivedTodo) -> Self {
        Todo::Archived(todo)
    }
}

impl Keyed for Todo {
    fn key(&self) -> &str {
        self.id().as_str()
    }
}

/// The phases [`archive`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Archivable {
    Active(ActiveTodo),
    Completed(CompletedTodo),
}

impl From<ActiveTodo> for Archivable {
    fn from(todo: ActiveTodo) -> Self {
        Archivable::Active(todo)
    }
}

impl From<CompletedTodo> for Archivable {
    fn from(todo: CompletedTodo) -> Self {
        Archivable::Completed(todo)
    }
}

/// Builds a new active todo stamped with the current time.
pub fn create_todo(
    id: TodoId,
    title: Title,
    description: Option<Description>,
    priority: Priority,
) -> ActiveTodo {
    ActiveTodo {
        details: TodoDetails {
            id,
            title,
            description,
            priority,
            created_at: Timestamp::now(),
        },
    }
}

pub fn complete(todo: ActiveTodo) -> CompletedTodo {
    CompletedTodo {
        details: todo.details,
        completed_at: Timestamp::now(),
    }
}

/// Drops the completion timestamp.
pub fn reopen(todo: CompletedTodo) -> ActiveTodo {
    ActiveTodo {
        details: todo.details,
    }
}

/// Archives an active or completed todo. A completion timestamp is discarded.
pub fn archive(todo: impl Into<Archivable>) -> ArchivedTodo {
    let details = match todo.into() {
        Archivable::Active(todo) => todo.details,
        Archivable::Completed(todo) => todo.details,
    };
    ArchivedTodo {
        details,
        archived_at: Timestamp::now(),
    }
}
