// src/repo/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{LeaderboardFilter, Repo};
use crate::error::AppError;
use crate::models::{Answer, Element, Score, User, score::UserTotal};

/// Postgres-backed repository.
///
/// Uses the runtime query API rather than the compile-time macros so the
/// crate builds without a live database. The schema lives under
/// `migrations/` and is applied at startup.
#[derive(Clone)]
pub struct PgRepo {
    pool: PgPool,
}

impl PgRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repo for PgRepo {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, display_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.username)
        .bind(&user.display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("Username '{}' already exists", user.username))
            } else {
                tracing::error!("Failed to insert user: {:?}", e);
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, display_name, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, display_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, display_name, created_at
            FROM users
            ORDER BY username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn insert_element(&self, element: &Element) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO elements (element_id, event_id, project_id, points)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&element.element_id)
        .bind(&element.event_id)
        .bind(&element.project_id)
        .bind(element.points)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_element(&self, element_id: &str) -> Result<Option<Element>, AppError> {
        let element = sqlx::query_as::<_, Element>(
            r#"
            SELECT element_id, event_id, project_id, right_answer, points, created_at
            FROM elements
            WHERE element_id = $1
            "#,
        )
        .bind(element_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(element)
    }

    async fn set_right_answer(&self, element_id: &str, value: i32) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE elements
            SET right_answer = $2, updated_at = now()
            WHERE element_id = $1
            "#,
        )
        .bind(element_id)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_answer(
        &self,
        user_id: &str,
        element_id: &str,
        value: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_answers (user_id, element_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, element_id) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(element_id)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn answers_for_element(&self, element_id: &str) -> Result<Vec<Answer>, AppError> {
        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT user_id, element_id, value, created_at
            FROM user_answers
            WHERE element_id = $1
            "#,
        )
        .bind(element_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    async fn upsert_score(&self, score: &Score) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO scores (user_id, element_id, project_id, event_id, points)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, element_id) DO UPDATE SET
                points = EXCLUDED.points,
                updated_at = now()
            "#,
        )
        .bind(&score.user_id)
        .bind(&score.element_id)
        .bind(&score.project_id)
        .bind(&score.event_id)
        .bind(score.points)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn scores_for_element(&self, element_id: &str) -> Result<Vec<Score>, AppError> {
        let scores = sqlx::query_as::<_, Score>(
            r#"
            SELECT user_id, element_id, project_id, event_id, points, created_at
            FROM scores
            WHERE element_id = $1
            "#,
        )
        .bind(element_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(scores)
    }

    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserTotal>, AppError> {
        // QueryBuilder for the optional equality filters
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT user_id, SUM(points) AS total_score FROM scores");

        let mut has_where = false;
        if let Some(project_id) = &filter.project_id {
            builder.push(" WHERE project_id = ");
            builder.push_bind(project_id);
            has_where = true;
        }
        if let Some(event_id) = &filter.event_id {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("event_id = ");
            builder.push_bind(event_id);
        }

        builder.push(" GROUP BY user_id ORDER BY total_score DESC, user_id ASC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows: Vec<UserTotal> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
