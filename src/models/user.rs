// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// Users are created on first login and their identity is immutable
/// afterwards. `username` is the normalized (trimmed, lowercased) unique
/// handle; `display_name` preserves the casing the user typed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-.]+$").unwrap());

/// DTO for the login endpoint (get-or-create by username).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(
            min = 3,
            max = 30,
            message = "Username length must be between 3 and 30 characters."
        ),
        custom(function = validate_username_charset)
    )]
    pub username: String,
}

fn validate_username_charset(username: &str) -> Result<(), validator::ValidationError> {
    if !USERNAME_RE.is_match(username.trim()) {
        return Err(validator::ValidationError::new("invalid_username_charset"));
    }
    Ok(())
}

/// Normalizes a username for uniqueness checks: trimmed and lowercased.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Alice.B  "), "alice.b");
    }

    #[test]
    fn test_username_charset_rejected() {
        let req = LoginRequest {
            username: "bad name!".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_username_accepted() {
        let req = LoginRequest {
            username: "good_name-1.a".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
