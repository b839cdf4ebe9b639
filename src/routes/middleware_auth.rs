use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller, as established by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::Unauthorized("No token, authorization denied"))
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => {
            tracing::debug!("missing bearer token");
            return Err(ApiError::Unauthorized("No token, authorization denied"));
        }
    };

    match state.keys.verify(token) {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthUser(user_id));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            Err(ApiError::Unauthorized("Token is not valid"))
        }
    }
}
