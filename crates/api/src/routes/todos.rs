//! Todo listing and lifecycle endpoints.
//!
//! Each command runs one workflow against a fresh unit of work and commits
//! it only when the workflow succeeds.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::Eff;
use domain::{CreateTodoInput, TodoDto, TodoEvent, TodoRepository, TodoService, WorkflowError};
use event_bus::UnitOfWork;
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: TodoRepository> {
    pub todo_service: TodoService<R>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub include_archived: bool,
}

/// GET /todos: newest first, archived todos only with `?includeArchived=true`.
#[tracing::instrument(skip(state))]
pub async fn list<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<TodoDto>> {
    let Ok(todos) = state
        .todo_service
        .get_all_todos(!query.include_archived)
        .await;
    Json(todos)
}

/// POST /todos: create a new active todo.
#[tracing::instrument(skip(state, body))]
pub async fn create<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<CreateTodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoDto>), ApiError> {
    let Json(input) = body?;
    let todo = execute(&state.todo_service, |service, uow| {
        service.create_todo(input, uow)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// POST /todos/{id}/complete
#[tracing::instrument(skip(state))]
pub async fn complete<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<TodoDto>, ApiError> {
    execute(&state.todo_service, |service, uow| {
        service.complete_todo(&id, uow)
    })
    .await
    .map(Json)
}

/// POST /todos/{id}/reopen
#[tracing::instrument(skip(state))]
pub async fn reopen<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<TodoDto>, ApiError> {
    execute(&state.todo_service, |service, uow| {
        service.reopen_todo(&id, uow)
    })
    .await
    .map(Json)
}

/// POST /todos/{id}/archive
#[tracing::instrument(skip(state))]
pub async fn archive<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<TodoDto>, ApiError> {
    execute(&state.todo_service, |service, uow| {
        service.archive_todo(&id, uow)
    })
    .await
    .map(Json)
}

/// Runs one workflow in its own unit of work, committing only on success.
async fn execute<R, F>(service: &TodoService<R>, workflow: F) -> Result<TodoDto, ApiError>
where
    R: TodoRepository,
    F: FnOnce(&TodoService<R>, &UnitOfWork<TodoEvent>) -> Eff<TodoDto, WorkflowError>,
{
    let uow = service.unit_of_work();
    let todo = workflow(service, &uow).await?;
    let published = uow.commit();
    tracing::debug!(todo_id = %todo.id, published, "command committed");
    Ok(todo)
}
