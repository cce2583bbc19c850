// src/services/grading.rs

use serde::Serialize;

use crate::cache::{Cache, LEADERBOARD_NS};
use crate::error::AppError;
use crate::models::Score;
use crate::repo::Repo;

/// Outcome of one grading pass over an element.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingSummary {
    pub element_id: String,
    pub answers_graded: usize,
    pub correct_count: usize,
}

/// Re-grades every submitted answer for an element against its right answer
/// and updates the score ledger.
///
/// Each (user, element) score row is *set* to the earned value (the
/// element's points on a match, 0 otherwise), never incremented, so the pass
/// is idempotent: re-running it after a correction, or retrying after a
/// transient failure left it partially applied, converges to the same
/// ledger state instead of double-counting.
///
/// On success the leaderboard cache namespace version is bumped so no stale
/// page outlives the new totals. The bump is best-effort: a cache failure is
/// logged and ignored, because correctness of the ledger takes priority
/// over cache freshness.
///
/// Answers submitted while a pass is running may be graded in that pass or
/// wait for the next correction (at-least-once, eventually consistent).
pub async fn grade_element(
    repo: &dyn Repo,
    cache: &dyn Cache,
    element_id: &str,
) -> Result<GradingSummary, AppError> {
    let element = repo
        .find_element(element_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Element not found".to_string()))?;

    let right_answer = element.right_answer.ok_or_else(|| {
        AppError::NotFound("Element is not gradable: right answer not set".to_string())
    })?;

    let answers = repo.answers_for_element(element_id).await?;
    tracing::info!(
        element_id,
        answers = answers.len(),
        "Starting score calculation"
    );

    let mut correct_count = 0;
    for answer in &answers {
        let is_correct = answer.value == right_answer;
        let earned = if is_correct { element.points } else { 0 };
        if is_correct {
            correct_count += 1;
        }

        repo.upsert_score(&Score {
            user_id: answer.user_id.clone(),
            element_id: element.element_id.clone(),
            project_id: element.project_id.clone(),
            event_id: element.event_id.clone(),
            points: earned,
            created_at: None,
        })
        .await?;
    }

    // Best-effort invalidation: bumping the namespace version orphans every
    // cached leaderboard page at once. Failures are logged inside the cache
    // layer and never abort the grading pass.
    let version = cache.bump_version(LEADERBOARD_NS).await;
    tracing::info!(
        element_id,
        answers = answers.len(),
        correct_count,
        cache_version = version,
        "Score calculation completed"
    );

    Ok(GradingSummary {
        element_id: element.element_id,
        answers_graded: answers.len(),
        correct_count,
    })
}
