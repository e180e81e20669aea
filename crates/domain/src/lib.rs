//! Domain layer for the todo system.
//!
//! This crate provides:
//! - Validated value objects ([`TodoId`], [`Title`], [`Description`], [`Priority`], [`Timestamp`])
//! - The [`Todo`] sum type with one struct per lifecycle state
//! - Pure transitions typed on their legal source state
//! - Workflows that validate, transition, persist, and queue a [`TodoEvent`]
//! - [`TodoService`] wiring a repository and an event bus together

pub mod error;
pub mod todo;

pub use error::WorkflowError;
pub use todo::{
    ActiveTodo, ArchivedTodo, Archivable, CompletedTodo, CreateTodoInput, Description,
    InMemoryTodoRepository, Priority, StoreTodoRepository, Timestamp, Title, Todo, TodoDetails,
    TodoDto, TodoEvent, TodoEventKind, TodoId, TodoRepository, TodoService, TodoStatus,
    ValidationMessage, archive, complete, create_todo, reopen, workflows,
};
