// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database: the ledger the leaderboard
/// sums over.
///
/// One row per (user, element), holding either 0 or the element's point
/// value. Re-grading overwrites the row, it never increments it, so grading
/// an element any number of times converges to the same ledger state.
/// Project and event ids are denormalized from the element so leaderboard
/// filtering does not need a join.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub user_id: String,
    pub element_id: String,
    pub project_id: String,
    pub event_id: String,
    pub points: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One aggregated row of the leaderboard query: a user and the sum of their
/// score rows under the active filter.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTotal {
    pub user_id: String,
    pub total_score: i64,
}

/// One entry of a leaderboard page as returned to clients. Rank is 1-based
/// and dense within the page: `offset + position + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub total_score: i64,
    pub rank: i64,
}
