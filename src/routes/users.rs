use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::User;
use crate::password::hash_password;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::{validate_email, validate_name, validate_password};

#[derive(Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<ApiResponse<RegisterResponse>, ApiError> {
    let Json(payload) = payload?;

    let name = validate_name(payload.name.as_deref());
    let email = validate_email(payload.email.as_deref());
    let password = validate_password(payload.password.as_deref());

    let (name, email, password) = match (name, email, password) {
        (Ok(n), Ok(e), Ok(p)) => (n, e, p),
        (n, e, p) => {
            let errors = [n.err(), e.err(), p.err()].into_iter().flatten().collect();
            return Err(ApiError::Validation(errors));
        }
    };

    let password_hash = hash_password(&password)
        .map_err(|e| ApiError::Internal(format!("password hash error: {}", e)))?;

    let user = state
        .store
        .create_user(User::new(name, &email, password_hash))
        .await?;

    let token = state
        .keys
        .issue(user.id)
        .map_err(|e| ApiError::Internal(format!("jwt encode error: {}", e)))?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::created(RegisterResponse { user, token }))
}
