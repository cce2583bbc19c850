// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validate_uuid;

/// Represents the 'user_answers' table in the database.
///
/// Exactly one row per (user, element): resubmission overwrites the previous
/// value. Answers are accepted whether or not the element's right answer has
/// been set yet.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub user_id: String,
    pub element_id: String,
    pub value: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting an answer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[validate(custom(function = validate_uuid))]
    pub user_id: String,
    #[validate(custom(function = validate_uuid))]
    pub element_id: String,
    pub user_answer: i32,
}
