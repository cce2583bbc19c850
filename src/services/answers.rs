// src/services/answers.rs

use validator::Validate;

use crate::error::AppError;
use crate::models::answer::SubmitAnswerRequest;
use crate::repo::Repo;

/// Upserts the (user, element) answer: one submission per pair,
/// resubmission overwrites the prior value. Accepted whether or not the
/// element's right answer has been set; ungraded submissions are picked up
/// by the next grading pass.
pub async fn submit_answer(repo: &dyn Repo, request: &SubmitAnswerRequest) -> Result<(), AppError> {
    if let Err(validation_errors) = request.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if repo.find_user(&request.user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if repo.find_element(&request.element_id).await?.is_none() {
        return Err(AppError::NotFound("Element not found".to_string()));
    }

    repo.upsert_answer(&request.user_id, &request.element_id, request.user_answer)
        .await?;

    tracing::debug!(
        user_id = %request.user_id,
        element_id = %request.element_id,
        "Answer recorded"
    );
    Ok(())
}
