use serde::Deserialize;

use crate::models::TodoChanges;
use crate::validation::{validate_todo_text, FieldError};

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default, alias = "text")]
    pub todo: Option<String>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<String, FieldError> {
        validate_todo_text(self.todo.as_deref())
    }
}

/// Partial update. Fields outside this struct, `user` included, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, alias = "text")]
    pub todo: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl UpdateTodo {
    pub fn into_changes(self) -> Result<TodoChanges, FieldError> {
        let text = match self.todo {
            Some(t) => Some(validate_todo_text(Some(&t))?),
            None => None,
        };

        Ok(TodoChanges {
            text,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_ignores_user_field() {
        let body: UpdateTodo = serde_json::from_value(serde_json::json!({
            "user": "00000000-0000-0000-0000-000000000000",
            "status": true
        }))
        .unwrap();

        let changes = body.into_changes().unwrap();
        assert_eq!(changes, TodoChanges { text: None, status: Some(true) });
    }

    #[test]
    fn test_update_blank_text_rejected() {
        let body = UpdateTodo { todo: Some("  ".into()), status: None };
        assert!(body.into_changes().is_err());
    }

    #[test]
    fn test_create_accepts_text_alias() {
        let body: CreateTodo =
            serde_json::from_value(serde_json::json!({ "text": " walk dog " })).unwrap();
        assert_eq!(body.validate().unwrap(), "walk dog");
    }

    #[test]
    fn test_create_missing_field() {
        let body: CreateTodo = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(body.validate().is_err());
    }
}
