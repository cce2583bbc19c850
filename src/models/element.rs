// src/models/element.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validate_uuid;

/// Represents the 'elements' table in the database.
///
/// An element is a gradable question. Its point value is fixed at creation;
/// the right answer is absent until an operator sets it, which is the event
/// that triggers grading of every submitted answer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub element_id: String,
    pub event_id: String,
    pub project_id: String,
    pub right_answer: Option<i32>,
    pub points: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new element.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateElementRequest {
    #[validate(custom(function = validate_uuid))]
    pub event_id: String,
    #[validate(custom(function = validate_uuid))]
    pub project_id: String,
    #[validate(range(min = 1, message = "Points must be a positive number."))]
    pub points: i32,
}

/// DTO for attaching the right answer to an element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRightAnswerRequest {
    pub right_answer: i32,
}
