use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed todo text, or an error if nothing is left.
pub fn validate_todo_text(text: Option<&str>) -> Result<String, FieldError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(FieldError::new("todo", "Todo is required")),
    }
}

pub fn validate_name(name: Option<&str>) -> Result<String, FieldError> {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(FieldError::new("name", "Name is required")),
    }
}

// one '@', something on both sides, a dot somewhere in the domain
pub fn validate_email(email: Option<&str>) -> Result<String, FieldError> {
    let invalid = || FieldError::new("email", "Please include a valid email");
    let email = email.map(str::trim).ok_or_else(invalid)?;

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(email.to_string())
}

pub fn validate_password(password: Option<&str>) -> Result<String, FieldError> {
    match password {
        Some(p) if p.chars().count() >= MIN_PASSWORD_LEN => Ok(p.to_string()),
        _ => Err(FieldError::new(
            "password",
            "Please enter a password with 8 or more characters",
        )),
    }
}
