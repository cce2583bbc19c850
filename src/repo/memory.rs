// src/repo/memory.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::{LeaderboardFilter, Repo};
use crate::error::AppError;
use crate::models::{Answer, Element, Score, User, score::UserTotal};

#[derive(Debug, Default)]
struct Data {
    users: Vec<User>,
    elements: Vec<Element>,
    answers: Vec<Answer>,
    scores: Vec<Score>,
}

/// In-memory repository for tests and local experimentation.
///
/// A single mutex over the whole data set: per-row upsert atomicity comes
/// for free, which matches the contract the Postgres implementation provides
/// through keyed `ON CONFLICT` statements.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepo {
    data: Arc<Mutex<Data>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repo for MemoryRepo {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        if data.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        let mut user = user.clone();
        user.created_at.get_or_insert_with(Utc::now);
        data.users.push(user);
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let data = self.data.lock().unwrap();
        let mut users = data.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn insert_element(&self, element: &Element) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        let mut element = element.clone();
        element.created_at.get_or_insert_with(Utc::now);
        data.elements.push(element);
        Ok(())
    }

    async fn find_element(&self, element_id: &str) -> Result<Option<Element>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .elements
            .iter()
            .find(|e| e.element_id == element_id)
            .cloned())
    }

    async fn set_right_answer(&self, element_id: &str, value: i32) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        match data.elements.iter_mut().find(|e| e.element_id == element_id) {
            Some(element) => {
                element.right_answer = Some(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn upsert_answer(
        &self,
        user_id: &str,
        element_id: &str,
        value: i32,
    ) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        match data
            .answers
            .iter_mut()
            .find(|a| a.user_id == user_id && a.element_id == element_id)
        {
            Some(answer) => answer.value = value,
            None => data.answers.push(Answer {
                user_id: user_id.to_string(),
                element_id: element_id.to_string(),
                value,
                created_at: Some(Utc::now()),
            }),
        }
        Ok(())
    }

    async fn answers_for_element(&self, element_id: &str) -> Result<Vec<Answer>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .answers
            .iter()
            .filter(|a| a.element_id == element_id)
            .cloned()
            .collect())
    }

    async fn upsert_score(&self, score: &Score) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        match data
            .scores
            .iter_mut()
            .find(|s| s.user_id == score.user_id && s.element_id == score.element_id)
        {
            Some(existing) => existing.points = score.points,
            None => {
                let mut score = score.clone();
                score.created_at.get_or_insert_with(Utc::now);
                data.scores.push(score);
            }
        }
        Ok(())
    }

    async fn scores_for_element(&self, element_id: &str) -> Result<Vec<Score>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .scores
            .iter()
            .filter(|s| s.element_id == element_id)
            .cloned()
            .collect())
    }

    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserTotal>, AppError> {
        let data = self.data.lock().unwrap();

        let mut totals: std::collections::HashMap<String, i64> = std::collections::HashMap::new();
        for score in &data.scores {
            if let Some(project_id) = &filter.project_id {
                if &score.project_id != project_id {
                    continue;
                }
            }
            if let Some(event_id) = &filter.event_id {
                if &score.event_id != event_id {
                    continue;
                }
            }
            *totals.entry(score.user_id.clone()).or_insert(0) += i64::from(score.points);
        }

        let mut rows: Vec<UserTotal> = totals
            .into_iter()
            .map(|(user_id, total_score)| UserTotal {
                user_id,
                total_score,
            })
            .collect();
        // Total descending, user id ascending on ties.
        rows.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
