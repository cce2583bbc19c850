// src/services/users.rs

use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::User;
use crate::models::user::{LoginRequest, normalize_username};
use crate::repo::Repo;

/// Returns the user with the given (normalized) username, creating them on
/// first login. The display name preserves the casing the user submitted;
/// identity is immutable afterwards.
pub async fn get_or_create_user(repo: &dyn Repo, username: &str) -> Result<User, AppError> {
    let request = LoginRequest {
        username: username.to_string(),
    };
    if let Err(validation_errors) = request.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let normalized = normalize_username(username);

    if let Some(user) = repo.find_user_by_username(&normalized).await? {
        return Ok(user);
    }

    let user = User {
        user_id: Uuid::new_v4().to_string(),
        username: normalized,
        display_name: Some(username.trim().to_string()),
        created_at: None,
    };
    repo.insert_user(&user).await?;
    tracing::info!("Created new user: {} ({})", user.username, user.user_id);

    Ok(user)
}

pub async fn get_user(repo: &dyn Repo, user_id: &str) -> Result<User, AppError> {
    crate::utils::require_uuid(user_id, "userId")?;
    repo.find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// All users, username ascending.
pub async fn list_users(repo: &dyn Repo) -> Result<Vec<User>, AppError> {
    repo.list_users().await
}
