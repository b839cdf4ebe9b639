//! In-memory store, used by the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{Todo, TodoChanges, User};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// Kept in insertion order so equal timestamps still list newest first.
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("user with email {}", user.email)));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_todo(&self, todo: Todo) -> StoreResult<Todo> {
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn list_todos(&self, user: Uuid) -> StoreResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        let mut owned: Vec<Todo> = todos
            .iter()
            .rev()
            .filter(|t| t.user == user)
            .cloned()
            .collect();
        // stable sort keeps later inserts ahead on ties
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_todo(&self, id: Uuid) -> StoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> StoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.iter_mut().find(|t| t.id == id).map(|todo| {
            todo.apply(changes);
            todo.clone()
        }))
    }

    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() != before)
    }
}
