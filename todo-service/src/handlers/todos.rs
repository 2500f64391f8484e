//! Todo CRUD handlers mounted under `/do-backend`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::dtos::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::startup::AppState;

fn parse_todo_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid todo id: {}", id)))
}

/// Create a todo.
///
/// POST /do-backend
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = state.store.create(payload.into()).await?;

    tracing::info!(todo_id = %todo.id, "Created todo");

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// List every todo.
///
/// GET /do-backend
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.store.list().await?;

    tracing::debug!(count = todos.len(), "Listed todos");

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Overwrite the provided fields of a todo.
///
/// PUT /do-backend/:id
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_todo_id(&id)?;

    let todo = state.store.update(id, payload.into()).await?;

    tracing::info!(todo_id = %todo.id, "Updated todo");

    Ok(Json(TodoResponse::from(todo)))
}

/// Delete a todo. Unknown ids still answer 204.
///
/// DELETE /do-backend/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_todo_id(&id)?;

    state.store.delete(id).await?;

    tracing::info!(todo_id = %id, "Deleted todo");

    Ok(StatusCode::NO_CONTENT)
}
