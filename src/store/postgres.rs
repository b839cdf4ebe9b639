use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{Todo, TodoChanges, User};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens the pool and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        let rec = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    return StoreError::Duplicate(format!("user with email {}", user.email));
                }
            }
            StoreError::Database(e)
        })?;

        Ok(rec)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let rec = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let rec = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn insert_todo(&self, todo: Todo) -> StoreResult<Todo> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (id, user_id, text, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, status, created_at
            "#,
        )
        .bind(todo.id)
        .bind(todo.user)
        .bind(&todo.text)
        .bind(todo.status)
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list_todos(&self, user: Uuid) -> StoreResult<Vec<Todo>> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, text, status, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn find_todo(&self, id: Uuid) -> StoreResult<Option<Todo>> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, text, status, created_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> StoreResult<Option<Todo>> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET
                text = COALESCE($2, text),
                status = COALESCE($3, status)
            WHERE id = $1
            RETURNING id, user_id, text, status, created_at
            "#,
        )
        .bind(id)
        .bind(changes.text)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
