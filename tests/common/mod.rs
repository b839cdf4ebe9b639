#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use todo_api::models::{Todo, TodoChanges, User};
use todo_api::routes;
use todo_api::state::AppState;
use todo_api::store::{MemoryStore, Store, StoreError, StoreResult};
use todo_api::token::JwtKeys;

pub const SECRET: &str = "test_secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub keys: JwtKeys,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), keys());
        Self {
            router: routes::app(state),
            store,
            keys: keys(),
        }
    }

    /// A bearer token for a fresh user id.
    pub fn new_caller(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        (user_id, self.keys.issue(user_id).unwrap())
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }
}

pub fn keys() -> JwtKeys {
    JwtKeys::new(SECRET, Duration::hours(1))
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Fails every call, to exercise the storage-error path.
pub struct BrokenStore;

fn broken<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl Store for BrokenStore {
    async fn create_user(&self, _user: User) -> StoreResult<User> {
        broken()
    }

    async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        broken()
    }

    async fn find_user_by_id(&self, _id: Uuid) -> StoreResult<Option<User>> {
        broken()
    }

    async fn insert_todo(&self, _todo: Todo) -> StoreResult<Todo> {
        broken()
    }

    async fn list_todos(&self, _user: Uuid) -> StoreResult<Vec<Todo>> {
        broken()
    }

    async fn find_todo(&self, _id: Uuid) -> StoreResult<Option<Todo>> {
        broken()
    }

    async fn update_todo(&self, _id: Uuid, _changes: TodoChanges) -> StoreResult<Option<Todo>> {
        broken()
    }

    async fn delete_todo(&self, _id: Uuid) -> StoreResult<bool> {
        broken()
    }
}

pub fn broken_app() -> Router {
    routes::app(AppState::new(Arc::new(BrokenStore), keys()))
}
