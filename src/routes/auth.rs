use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{normalize_email, User};
use crate::password::verify_password;
use crate::response::ApiResponse;
use crate::routes::middleware_auth::AuthUser;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<LoginResponse>, ApiError> {
    let Json(payload) = payload?;

    let user = state
        .store
        .find_user_by_email(&normalize_email(&payload.email))
        .await?
        .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    }

    let token = state
        .keys
        .issue(user.id)
        .map_err(|e| ApiError::Internal(format!("jwt encode error: {}", e)))?;

    Ok(ApiResponse::data(LoginResponse { token }))
}

/// The logged-in user's own record.
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiResponse<User>, ApiError> {
    let user = state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(ApiResponse::data(user))
}
