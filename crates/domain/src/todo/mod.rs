//! Todo entity and related types.

mod dto;
mod entity;
mod events;
mod repository;
mod service;
mod state;
mod value_objects;
pub mod workflows;

pub use dto::TodoDto;
pub use entity::{
    ActiveTodo, ArchivedTodo, Archivable, CompletedTodo, Todo, TodoDetails, archive, complete,
    create_todo, reopen,
};
pub use events::{TodoEvent, TodoEventKind};
pub use repository::{InMemoryTodoRepository, StoreTodoRepository, TodoRepository};
pub use service::TodoService;
pub use state::TodoStatus;
pub use value_objects::{
    DESCRIPTION_MAX_LEN, Description, ID_PREFIX, Priority, TITLE_MAX_LEN, Timestamp, Title,
    TodoId, ValidationMessage,
};
pub use workflows::CreateTodoInput;
