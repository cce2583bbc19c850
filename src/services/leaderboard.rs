// src/services/leaderboard.rs

use std::time::Duration;

use crate::cache::{Cache, LEADERBOARD_NS};
use crate::error::AppError;
use crate::models::score::LeaderboardEntry;
use crate::repo::{LeaderboardFilter, Repo};
use crate::utils::require_uuid;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Leaderboard request: optional project/event filter plus pagination.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    pub project_id: Option<String>,
    pub event_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Cache key for one leaderboard page. Embeds the current namespace version
/// so a version bump orphans every previously written page, and the exact
/// filter/pagination tuple so each page is an independent entry.
fn cache_key(version: u64, filter: &LeaderboardFilter, limit: i64, offset: i64) -> String {
    format!(
        "{}:v{}:{}:{}:{}:{}",
        LEADERBOARD_NS,
        version,
        filter.project_id.as_deref().unwrap_or("all"),
        filter.event_id.as_deref().unwrap_or("all"),
        limit,
        offset
    )
}

/// Computes one ranked leaderboard page, consulting the cache first.
///
/// On a hit the stored page is returned verbatim. On a miss the score
/// ledger is aggregated (sum per user under the filter, total descending,
/// user id ascending on ties), the requested window sliced, ranks assigned
/// as `offset + position + 1`, and the page written back with the
/// configured TTL. Cache trouble on either side never fails the read: the
/// aggregator falls through to direct computation and skips the write.
pub async fn get_leaderboard(
    repo: &dyn Repo,
    cache: &dyn Cache,
    ttl: Duration,
    query: &LeaderboardQuery,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    if let Some(project_id) = &query.project_id {
        require_uuid(project_id, "projectId")?;
    }
    if let Some(event_id) = &query.event_id {
        require_uuid(event_id, "eventId")?;
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "Limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::BadRequest(
            "Offset must not be negative".to_string(),
        ));
    }

    let filter = LeaderboardFilter {
        project_id: query.project_id.clone(),
        event_id: query.event_id.clone(),
    };

    let version = cache.namespace_version(LEADERBOARD_NS).await;
    let key = cache_key(version, &filter, limit, offset);

    if let Some(cached) = cache.get(&key).await {
        match serde_json::from_str::<Vec<LeaderboardEntry>>(&cached) {
            Ok(page) => {
                tracing::debug!(key = %key, "Returning leaderboard from cache");
                return Ok(page);
            }
            Err(e) => {
                // Unparseable entry: treat as a miss and recompute.
                tracing::warn!(key = %key, "Discarding corrupt leaderboard cache entry: {}", e);
            }
        }
    }

    let totals = repo.leaderboard(&filter, limit, offset).await?;
    let page: Vec<LeaderboardEntry> = totals
        .into_iter()
        .enumerate()
        .map(|(position, row)| LeaderboardEntry {
            user_id: row.user_id,
            total_score: row.total_score,
            rank: offset + position as i64 + 1,
        })
        .collect();

    match serde_json::to_string(&page) {
        Ok(json) => cache.set(&key, &json, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize leaderboard page for cache: {}", e),
    }

    Ok(page)
}
