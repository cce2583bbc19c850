// src/handlers/answers.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError, models::answer::SubmitAnswerRequest, services::answers, state::AppState,
};

/// Submits (or overwrites) a user's answer for an element. Independent of
/// whether the element has a right answer yet.
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    answers::submit_answer(state.repo.as_ref(), &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Answer submitted successfully" })),
    ))
}
