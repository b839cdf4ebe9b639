use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    #[sqlx(rename = "user_id")]
    pub user: Uuid,
    #[serde(rename = "todo")]
    pub text: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// New open todo owned by `user`, stamped with the current time.
    pub fn new(user: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text: text.into(),
            status: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user: Uuid) -> bool {
        self.user == user
    }

    /// Applies a partial update. Ownership is not part of `TodoChanges`.
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
