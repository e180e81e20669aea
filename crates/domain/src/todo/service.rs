//! Todo service wiring a repository and an event bus together.

use std::convert::Infallible;
use std::sync::Arc;

use common::Eff;
use event_bus::{EventBus, InMemoryEventBus, UnitOfWork};
use tracing::Instrument;

use super::dto::TodoDto;
use super::events::TodoEvent;
use super::repository::{InMemoryTodoRepository, TodoRepository};
use super::workflows::{self, CreateTodoInput};
use crate::error::WorkflowError;

/// Entry point for todo operations.
///
/// Holds the repository and the bus that committed events go to. Callers
/// take a [`UnitOfWork`] from [`TodoService::unit_of_work`], run one or more
/// workflows against it, and commit it once they succeed.
pub struct TodoService<R: TodoRepository + ?Sized> {
    repository: Arc<R>,
    bus: Arc<dyn EventBus<TodoEvent>>,
}

impl TodoService<InMemoryTodoRepository> {
    /// Creates a service over an empty in-memory repository and a fresh bus.
    pub fn in_memory() -> Self {
        let bus: InMemoryEventBus<TodoEvent> = InMemoryEventBus::new();
        Self::new(
            Arc::new(InMemoryTodoRepository::in_memory()),
            Arc::new(bus),
        )
    }
}

impl<R: TodoRepository + ?Sized> TodoService<R> {
    /// Creates a new todo service.
    pub fn new(repository: Arc<R>, bus: Arc<dyn EventBus<TodoEvent>>) -> Self {
        Self { repository, bus }
    }

    /// Returns the repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Returns the event bus.
    pub fn bus(&self) -> &Arc<dyn EventBus<TodoEvent>> {
        &self.bus
    }

    /// Starts an empty unit of work publishing to this service's bus.
    pub fn unit_of_work(&self) -> UnitOfWork<TodoEvent> {
        UnitOfWork::new(Arc::clone(&self.bus))
    }

    /// Lists todos, newest first.
    pub fn get_all_todos(&self, exclude_archived: bool) -> Eff<Vec<TodoDto>, Infallible> {
        let span = tracing::info_span!("get_all_todos", exclude_archived);
        let listing = workflows::get_all(&self.repository, exclude_archived);
        Eff::new(move || {
            async move {
                let result = listing.run().await;
                if let Ok(todos) = &result {
                    tracing::debug!(count = todos.len(), "listed todos");
                }
                result
            }
            .instrument(span)
        })
    }

    pub fn create_todo(
        &self,
        input: CreateTodoInput,
        uow: &UnitOfWork<TodoEvent>,
    ) -> Eff<TodoDto, WorkflowError> {
        observe("create", workflows::create(&self.repository, input, uow))
    }

    pub fn complete_todo(
        &self,
        id: &str,
        uow: &UnitOfWork<TodoEvent>,
    ) -> Eff<TodoDto, WorkflowError> {
        observe("complete", workflows::complete(&self.repository, id, uow))
    }

    pub fn reopen_todo(
        &self,
        id: &str,
        uow: &UnitOfWork<TodoEvent>,
    ) -> Eff<TodoDto, WorkflowError> {
        observe("reopen", workflows::reopen(&self.repository, id, uow))
    }

    pub fn archive_todo(
        &self,
        id: &str,
        uow: &UnitOfWork<TodoEvent>,
    ) -> Eff<TodoDto, WorkflowError> {
        observe("archive", workflows::archive(&self.repository, id, uow))
    }
}

impl<R: TodoRepository + ?Sized> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            bus: Arc::clone(&self.bus),
        }
    }
}

/// Records the outcome of a workflow run in a span, a log line, and a counter.
fn observe(
    workflow: &'static str,
    eff: Eff<TodoDto, WorkflowError>,
) -> Eff<TodoDto, WorkflowError> {
    let span = tracing::info_span!("workflow", workflow);
    Eff::new(move || {
        async move {
            let result = eff.run().await;
            let outcome = match &result {
                Ok(todo) => {
                    tracing::info!(todo_id = %todo.id, status = %todo.status, "workflow succeeded");
                    "ok"
                }
                Err(error) => {
                    tracing::warn!(%error, "workflow rejected");
                    error.kind()
                }
            };
            metrics::counter!("todo_workflows_total", "workflow" => workflow, "outcome" => outcome)
                .increment(1);
            result
        }
        .instrument(span)
    })
}
