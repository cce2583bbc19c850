// src/services/elements.rs

use uuid::Uuid;
use validator::Validate;

use crate::cache::Cache;
use crate::error::AppError;
use crate::models::Element;
use crate::models::element::CreateElementRequest;
use crate::repo::Repo;
use crate::utils::require_uuid;
use crate::services::grading::{self, GradingSummary};

/// Creates a new element. Point value is fixed here; the right answer is
/// attached later through [`set_right_answer`].
pub async fn create_element(
    repo: &dyn Repo,
    request: &CreateElementRequest,
) -> Result<Element, AppError> {
    if let Err(validation_errors) = request.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let element = Element {
        element_id: Uuid::new_v4().to_string(),
        event_id: request.event_id.clone(),
        project_id: request.project_id.clone(),
        right_answer: None,
        points: request.points,
        created_at: None,
    };
    repo.insert_element(&element).await?;
    tracing::info!(
        element_id = %element.element_id,
        points = element.points,
        "Created element"
    );

    Ok(element)
}

/// Attaches the right answer to an element and synchronously grades every
/// submitted answer before returning, so the caller observes the updated
/// ledger (and an invalidated leaderboard cache) once this completes.
///
/// Re-setting an already-set answer is allowed: it logs a warning and
/// re-triggers the full (idempotent) grading pass, which is how an operator
/// recovers from publishing a wrong answer.
pub async fn set_right_answer(
    repo: &dyn Repo,
    cache: &dyn Cache,
    element_id: &str,
    value: i32,
) -> Result<GradingSummary, AppError> {
    require_uuid(element_id, "elementId")?;

    let element = repo
        .find_element(element_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Element not found".to_string()))?;

    if let Some(previous) = element.right_answer {
        tracing::warn!(
            element_id,
            previous,
            new = value,
            "Right answer redefined; re-grading all answers"
        );
    }

    if !repo.set_right_answer(element_id, value).await? {
        return Err(AppError::NotFound("Element not found".to_string()));
    }

    grading::grade_element(repo, cache, element_id).await
}
