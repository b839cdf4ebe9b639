//! Persistence for users and todos.
//!
//! Handlers only see the [`Store`] trait; `PgStore` backs the running server and
//! `MemoryStore` backs the test suite.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Todo, TodoChanges, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was hit, e.g. a second user with the same email.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync + 'static {
    // Users

    /// Persists a new user. Fails with `Duplicate` if the email is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    // Todos

    async fn insert_todo(&self, todo: Todo) -> StoreResult<Todo>;

    /// All todos owned by `user`, newest first.
    async fn list_todos(&self, user: Uuid) -> StoreResult<Vec<Todo>>;

    async fn find_todo(&self, id: Uuid) -> StoreResult<Option<Todo>>;

    /// Applies `changes` and returns the updated record, or `None` if it no longer exists.
    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> StoreResult<Option<Todo>>;

    /// Returns whether a record was removed.
    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool>;
}
