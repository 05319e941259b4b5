// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'quiz_attempts' table. Rows are only ever inserted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizAttempt {
    pub id: i64,
    #[sqlx(rename = "quiz_id")]
    pub quiz: i64,
    /// None for anonymous learners.
    #[sqlx(rename = "user_id")]
    pub user: Option<i64>,
    pub score: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    pub quiz: i64,
    pub user: Option<i64>,
    #[validate(range(min = 0, message = "Score cannot be negative."))]
    pub score: i64,
}
