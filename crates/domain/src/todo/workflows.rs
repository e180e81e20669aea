//! Todo use cases.
//!
//! Every workflow returns a lazy [`Eff`]. When run, it validates its input,
//! loads and checks the todo where needed, applies a transition, saves the
//! result, and only then queues exactly one [`TodoEvent`] on the unit of work.
//! A failed run leaves the repository and the unit of work untouched.

use std::convert::Infallible;
use std::sync::Arc;

use common::{Eff, Validator};
use event_bus::UnitOfWork;
use serde::Deserialize;
use serde_json::Value;

use super::dto::TodoDto;
use super::entity::{self, Todo};
use super::events::TodoEvent;
use super::repository::TodoRepository;
use super::state::TodoStatus;
use super::value_objects::{Description, Priority, Title, TodoId, ValidationMessage};
use crate::error::WorkflowError;

/// Raw input for [`create`].
///
/// Fields hold the JSON value exactly as received, so a value of the wrong
/// type is reported as a field error alongside every other one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTodoInput {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
}

impl CreateTodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Value::String(description.into()));
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(Value::String(priority.into()));
        self
    }
}

/// A raw input field, classified by JSON type.
enum RawField<'a> {
    Missing,
    Text(&'a str),
    Other,
}

impl<'a> RawField<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Missing,
            Some(Value::String(text)) => RawField::Text(text),
            Some(_) => RawField::Other,
        }
    }
}

fn parse_title(value: Option<&Value>) -> Result<Title, ValidationMessage> {
    match RawField::of(value) {
        RawField::Text(text) => Title::create(text),
        RawField::Missing | RawField::Other => Err(ValidationMessage::TitleRequired),
    }
}

fn parse_description(value: Option<&Value>) -> Result<Option<Description>, ValidationMessage> {
    match RawField::of(value) {
        RawField::Missing => Description::create(None),
        RawField::Text(text) => Description::create(Some(text)),
        RawField::Other => Err(ValidationMessage::InvalidDescription),
    }
}

fn parse_priority(value: Option<&Value>) -> Result<Priority, ValidationMessage> {
    match RawField::of(value) {
        RawField::Missing => Priority::create(None),
        RawField::Text(text) => Priority::create(Some(text)),
        RawField::Other => Err(ValidationMessage::InvalidPriority),
    }
}

/// Creates a new active todo.
///
/// The id and creation time are assigned when the effect runs.
pub fn create<R>(
    repo: &Arc<R>,
    input: CreateTodoInput,
    uow: &UnitOfWork<TodoEvent>,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
{
    let mut validator = Validator::new();
    let title = validator.check("title", parse_title(input.title.as_ref()));
    let description = validator.check(
        "description",
        parse_description(input.description.as_ref()),
    );
    let priority = validator.check("priority", parse_priority(input.priority.as_ref()));

    let (Some(title), Some(description), Some(priority)) = (title, description, priority) else {
        return Eff::fail(WorkflowError::Validation {
            errors: validator.into_errors(),
        });
    };

    let repo = Arc::clone(repo);
    let uow = uow.clone();
    Eff::new(move || async move {
        let todo = entity::create_todo(TodoId::generate(), title, description, priority);
        let event = TodoEvent::created(&todo);
        persist(repo.as_ref(), todo.into(), event, &uow).run().await
    })
}

/// Marks an active todo as done.
pub fn complete<R>(
    repo: &Arc<R>,
    raw_id: &str,
    uow: &UnitOfWork<TodoEvent>,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
{
    transition(repo, raw_id, uow, |todo| match todo {
        Todo::Active(active) => {
            let completed = entity::complete(active);
            let event = TodoEvent::completed(&completed);
            Ok((completed.into(), event))
        }
        other => Err(WorkflowError::invalid_state(
            TodoStatus::Active.as_str(),
            other.status(),
        )),
    })
}

/// Moves a completed todo back to active.
pub fn reopen<R>(
    repo: &Arc<R>,
    raw_id: &str,
    uow: &UnitOfWork<TodoEvent>,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
{
    transition(repo, raw_id, uow, |todo| match todo {
        Todo::Completed(completed) => {
            let active = entity::reopen(completed);
            let event = TodoEvent::reopened(&active);
            Ok((active.into(), event))
        }
        other => Err(WorkflowError::invalid_state(
            TodoStatus::Completed.as_str(),
            other.status(),
        )),
    })
}

/// Archives an active or completed todo.
pub fn archive<R>(
    repo: &Arc<R>,
    raw_id: &str,
    uow: &UnitOfWork<TodoEvent>,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
{
    transition(repo, raw_id, uow, |todo| {
        let archived = match todo {
            Todo::Active(active) => entity::archive(active),
            Todo::Completed(completed) => entity::archive(completed),
            Todo::Archived(_) => {
                return Err(WorkflowError::invalid_state(
                    "Active|Completed",
                    TodoStatus::Archived,
                ));
            }
        };
        let event = TodoEvent::archived(&archived);
        Ok((archived.into(), event))
    })
}

/// Lists todos, newest first.
///
/// Todos created at the same instant keep the repository's order.
pub fn get_all<R>(repo: &Arc<R>, exclude_archived: bool) -> Eff<Vec<TodoDto>, Infallible>
where
    R: TodoRepository + ?Sized,
{
    repo.find_all().map(move |todos| {
        let mut todos: Vec<Todo> = todos
            .into_iter()
            .filter(|todo| !(exclude_archived && todo.status() == TodoStatus::Archived))
            .collect();
        todos.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        todos.iter().map(TodoDto::from).collect()
    })
}

/// Parses the id, loads the todo, and hands it to `step`.
fn transition<R, F>(
    repo: &Arc<R>,
    raw_id: &str,
    uow: &UnitOfWork<TodoEvent>,
    step: F,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
    F: FnOnce(Todo) -> Result<(Todo, TodoEvent), WorkflowError> + Send + 'static,
{
    let id = match TodoId::parse(raw_id) {
        Ok(id) => id,
        Err(message) => {
            return Eff::fail(WorkflowError::InvalidId {
                message: message.to_string(),
            });
        }
    };

    let repo = Arc::clone(repo);
    let uow = uow.clone();
    repo.find_by_id(&id).widen().flat_map(move |found| {
        let Some(todo) = found else {
            return Eff::fail(WorkflowError::NotFound);
        };
        match step(todo) {
            Ok((next, event)) => persist(repo.as_ref(), next, event, &uow),
            Err(error) => Eff::fail(error),
        }
    })
}

/// Saves `todo`, then queues `event`.
fn persist<R>(
    repo: &R,
    todo: Todo,
    event: TodoEvent,
    uow: &UnitOfWork<TodoEvent>,
) -> Eff<TodoDto, WorkflowError>
where
    R: TodoRepository + ?Sized,
{
    let uow = uow.clone();
    repo.save(todo).widen().map(move |saved| {
        uow.push(event);
        TodoDto::from(&saved)
    })
}
