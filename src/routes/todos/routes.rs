use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use super::dto::{CreateTodo, UpdateTodo};
use crate::error::ApiError;
use crate::models::Todo;
use crate::response::ApiResponse;
use crate::routes::middleware_auth::AuthUser;
use crate::state::AppState;

const NOT_FOUND: &str = "Todo not found";
const NOT_OWNER: &str = "Not authorized";

/// All of the caller's todos, newest first.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiResponse<Vec<Todo>>, ApiError> {
    let todos = state.store.list_todos(user_id).await?;

    Ok(ApiResponse::list(todos))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<ApiResponse<Todo>, ApiError> {
    let Json(body) = body?;
    let text = body.validate()?;

    let todo = state.store.insert_todo(Todo::new(user_id, text)).await?;
    tracing::info!(todo_id = %todo.id, %user_id, "todo created");

    Ok(ApiResponse::data(todo))
}

/// Validate, look up, check owner, then apply.
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<ApiResponse<Todo>, ApiError> {
    let Json(body) = body?;
    let changes = body.into_changes()?;

    let id = find_owned(&state, user_id, &id).await?;

    // may have been deleted since the lookup
    let todo = state
        .store
        .update_todo(id, changes)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(ApiResponse::data(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = find_owned(&state, user_id, &id).await?;

    if !state.store.delete_todo(id).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    tracing::info!(todo_id = %id, %user_id, "todo removed");

    Ok(ApiResponse::message("Todo removed"))
}

/// Resolves a path id to a todo the caller owns.
async fn find_owned(state: &AppState, user_id: Uuid, raw_id: &str) -> Result<Uuid, ApiError> {
    // a malformed id cannot name a stored todo
    let id = Uuid::parse_str(raw_id).map_err(|_| ApiError::NotFound(NOT_FOUND))?;

    let todo = state
        .store
        .find_todo(id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    if !todo.is_owned_by(user_id) {
        tracing::debug!(todo_id = %id, %user_id, "ownership check failed");
        return Err(ApiError::Forbidden(NOT_OWNER));
    }

    Ok(id)
}
