// src/handlers/elements.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::element::{CreateElementRequest, SetRightAnswerRequest},
    services::elements,
    state::AppState,
};

/// Creates a new element (question) with a fixed point value.
pub async fn create_element(
    State(state): State<AppState>,
    Json(payload): Json<CreateElementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let element = elements::create_element(state.repo.as_ref(), &payload).await?;
    Ok((StatusCode::CREATED, Json(element)))
}

/// Sets the right answer for an element.
///
/// Grading runs synchronously inside this request: the response is delayed
/// until every submitted answer is re-graded and the leaderboard cache
/// invalidated, so a leaderboard read issued after this returns sees the
/// new totals.
pub async fn set_right_answer(
    State(state): State<AppState>,
    Path(element_id): Path<String>,
    Json(payload): Json<SetRightAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let summary = elements::set_right_answer(
        state.repo.as_ref(),
        state.cache.as_ref(),
        &element_id,
        payload.right_answer,
    )
    .await?;

    Ok(Json(json!({
        "message": "Right answer set and scores recalculated",
        "answersGraded": summary.answers_graded,
        "correctCount": summary.correct_count,
    })))
}
