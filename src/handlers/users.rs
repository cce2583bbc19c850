// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{error::AppError, models::user::LoginRequest, services::users, state::AppState};

/// Gets or creates a user by username ("login" without credentials;
/// authentication is out of scope for this service).
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::get_or_create_user(state.repo.as_ref(), &payload.username).await?;

    Ok(Json(json!({
        "userId": user.user_id,
        "username": user.username,
        "displayName": user.display_name,
    })))
}

/// Lists all users, username ascending.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = users::list_users(state.repo.as_ref()).await?;
    Ok(Json(json!({ "users": users })))
}

/// Retrieves a single user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::get_user(state.repo.as_ref(), &user_id).await?;
    Ok(Json(user))
}
