// src/repo/mod.rs

mod memory;
mod postgres;

pub use memory::MemoryRepo;
pub use postgres::PgRepo;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Answer, Element, Score, User, score::UserTotal};

/// Equality filter for leaderboard aggregation. Both fields optional;
/// absent means "all".
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilter {
    pub project_id: Option<String>,
    pub event_id: Option<String>,
}

/// Abstract persistence capability.
///
/// Implementations are explicitly constructed and injected at startup so
/// tests can substitute [`MemoryRepo`] for the Postgres-backed [`PgRepo`].
/// Upserts are keyed per row, so concurrent grading of distinct elements
/// cannot lose each other's updates.
///
/// All failures surface as [`AppError::InternalServerError`] and abort the
/// triggering operation.
#[async_trait]
pub trait Repo: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    /// All users, username ascending.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn insert_element(&self, element: &Element) -> Result<(), AppError>;
    async fn find_element(&self, element_id: &str) -> Result<Option<Element>, AppError>;
    /// Returns false if no such element exists.
    async fn set_right_answer(&self, element_id: &str, value: i32) -> Result<bool, AppError>;

    /// One answer per (user, element); resubmission overwrites.
    async fn upsert_answer(&self, user_id: &str, element_id: &str, value: i32)
    -> Result<(), AppError>;
    async fn answers_for_element(&self, element_id: &str) -> Result<Vec<Answer>, AppError>;

    /// One score row per (user, element); grading overwrites, never
    /// increments.
    async fn upsert_score(&self, score: &Score) -> Result<(), AppError>;
    async fn scores_for_element(&self, element_id: &str) -> Result<Vec<Score>, AppError>;

    /// SUM(points) grouped by user under the filter, ordered by total
    /// descending with user id ascending as the tie-break, so pagination is
    /// stable across repeated calls.
    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserTotal>, AppError>;
}
