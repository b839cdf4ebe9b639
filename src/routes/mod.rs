use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
mod health;
pub mod middleware_auth;
pub mod todos;
pub mod users;

pub use health::health;

use crate::state::AppState;

/// The whole HTTP surface, bound to `state`.
pub fn app(state: AppState) -> Router {
    let todo_router = Router::new()
        .route("/", get(todos::routes::list).post(todos::routes::create))
        .route(
            "/{id}",
            put(todos::routes::update).delete(todos::routes::delete),
        );

    let protected = Router::new()
        .route("/api/auth", get(auth::current_user))
        .nest("/api/todos", todo_router)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_auth::require_auth,
        ));

    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/users", post(users::register))
        .route("/api/auth", post(auth::login));

    public
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "msg": "Welcome to the Todo API" }))
}
