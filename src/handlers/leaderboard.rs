// src/handlers/leaderboard.rs

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    services::leaderboard::{self, LeaderboardQuery},
    state::AppState,
};

/// Query parameters for the leaderboard endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub project_id: Option<String>,
    pub event_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Returns one ranked leaderboard page, optionally filtered by project
/// and/or event.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = LeaderboardQuery {
        project_id: params.project_id,
        event_id: params.event_id,
        limit: params.limit,
        offset: params.offset,
    };

    let page = leaderboard::get_leaderboard(
        state.repo.as_ref(),
        state.cache.as_ref(),
        Duration::from_secs(state.config.cache_ttl_secs),
        &query,
    )
    .await?;

    Ok(Json(json!({ "leaderboard": page })))
}
