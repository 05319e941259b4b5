// src/db/quizzes.rs

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, types::Json};

use crate::models::{
    attempt::{QuizAttempt, SubmitAttemptRequest},
    quiz::{CreateQuizRequest, Quiz, QuizContent, QuizKind, UpdateQuizRequest},
};

const QUIZ_COLUMNS: &str = r#"
    SELECT id, title, quiz_type, difficulty, cover_image, lesson_id, age_group, content, created_at
    FROM quizzes
"#;

/// Every quiz, newest first.
pub async fn list_quizzes(pool: &SqlitePool) -> Result<Vec<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("{} ORDER BY id DESC", QUIZ_COLUMNS))
        .fetch_all(pool)
        .await
}

/// Admin list, newest first, narrowed by exact `quiz_type` and `difficulty`.
pub async fn filter_quizzes(
    pool: &SqlitePool,
    quiz_type: Option<&str>,
    difficulty: Option<&str>,
) -> Result<Vec<Quiz>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(QUIZ_COLUMNS);
    builder.push(" WHERE 1 = 1");
    if let Some(quiz_type) = quiz_type {
        builder.push(" AND quiz_type = ");
        builder.push_bind(quiz_type.to_string());
    }
    if let Some(difficulty) = difficulty {
        builder.push(" AND difficulty = ");
        builder.push_bind(difficulty.to_string());
    }
    builder.push(" ORDER BY id DESC");

    builder.build_query_as::<Quiz>().fetch_all(pool).await
}

pub async fn quizzes_for_lesson(pool: &SqlitePool, lesson_id: i64) -> Result<Vec<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("{} WHERE lesson_id = ? ORDER BY id", QUIZ_COLUMNS))
        .bind(lesson_id)
        .fetch_all(pool)
        .await
}

pub async fn get_quiz(pool: &SqlitePool, id: i64) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("{} WHERE id = ?", QUIZ_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// A quiz only if it is of the given kind.
pub async fn get_quiz_of_kind(
    pool: &SqlitePool,
    id: i64,
    kind: QuizKind,
) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("{} WHERE id = ? AND quiz_type = ?", QUIZ_COLUMNS))
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(pool)
        .await
}

/// Inserts a quiz; `quiz_type` is taken from the content variant.
pub async fn create_quiz(pool: &SqlitePool, req: CreateQuizRequest) -> Result<i64, sqlx::Error> {
    let mut content = req.content;
    content.assign_ids();

    sqlx::query_scalar(
        r#"
        INSERT INTO quizzes (title, quiz_type, difficulty, cover_image, lesson_id, age_group, content, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&req.title)
    .bind(content.kind().as_str())
    .bind(&req.difficulty)
    .bind(&req.cover_image)
    .bind(req.lesson_id)
    .bind(&req.age_group)
    .bind(Json(&content))
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn update_quiz(
    pool: &SqlitePool,
    id: i64,
    req: UpdateQuizRequest,
) -> Result<Option<u64>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE quizzes SET ");
    let mut separated = builder.separated(", ");
    let mut touched = false;

    if let Some(title) = req.title {
        separated.push("title = ");
        separated.push_bind_unseparated(title);
        touched = true;
    }
    if let Some(difficulty) = req.difficulty {
        separated.push("difficulty = ");
        separated.push_bind_unseparated(difficulty);
        touched = true;
    }
    if let Some(cover_image) = req.cover_image {
        separated.push("cover_image = ");
        separated.push_bind_unseparated(cover_image);
        touched = true;
    }
    if let Some(lesson_id) = req.lesson_id {
        separated.push("lesson_id = ");
        separated.push_bind_unseparated(lesson_id);
        touched = true;
    }
    if let Some(age_group) = req.age_group {
        separated.push("age_group = ");
        separated.push_bind_unseparated(age_group);
        touched = true;
    }

    if !touched {
        return Ok(None);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(pool).await?;
    Ok(Some(result.rows_affected()))
}

/// Replaces a quiz's content and type in one statement.
/// Returns the previous `quiz_type`, or `None` if the quiz does not exist.
pub async fn replace_content(
    pool: &SqlitePool,
    id: i64,
    mut content: QuizContent,
) -> Result<Option<String>, sqlx::Error> {
    content.assign_ids();

    let mut tx = pool.begin().await?;

    let previous: Option<String> = sqlx::query_scalar("SELECT quiz_type FROM quizzes WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(previous) = previous else {
        return Ok(None);
    };

    sqlx::query("UPDATE quizzes SET quiz_type = ?, content = ? WHERE id = ?")
        .bind(content.kind().as_str())
        .bind(Json(&content))
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(previous))
}

/// Attempts cascade with the quiz.
pub async fn delete_quiz(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn quiz_exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM quizzes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn user_exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Appends an attempt and returns the stored row.
pub async fn record_attempt(
    pool: &SqlitePool,
    req: &SubmitAttemptRequest,
) -> Result<QuizAttempt, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(
        r#"
        INSERT INTO quiz_attempts (quiz_id, user_id, score, submitted_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, quiz_id, user_id, score, submitted_at
        "#,
    )
    .bind(req.quiz)
    .bind(req.user)
    .bind(req.score)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}
