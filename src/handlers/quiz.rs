// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    db::quizzes,
    error::AppError,
    models::{attempt::SubmitAttemptRequest, quiz::QuizKind},
    serializers::quiz::{QuizDetail, QuizListItem, VisualQuizDetail},
    utils::media::MediaUrls,
};

/// Lists every quiz, newest first.
pub async fn list_quizzes(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = quizzes::list_quizzes(&pool).await.map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let body: Vec<QuizListItem> = quizzes
        .into_iter()
        .map(|q| QuizListItem::new(q, &media))
        .collect();

    Ok(Json(body))
}

/// Full quiz with the content of its type.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes::get_quiz(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(QuizDetail::new(quiz, &media)))
}

/// Visual quiz with its picture questions. 404 for any other quiz type.
pub async fn get_visual_quiz(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = quizzes::get_quiz_of_kind(&pool, id, QuizKind::Visual)
        .await?
        .and_then(|quiz| VisualQuizDetail::new(quiz, &media))
        .ok_or(AppError::NotFound("Visual quiz not found".to_string()))?;

    Ok(Json(detail))
}

/// Audio quiz in the generic detail shape. 404 for any other quiz type.
pub async fn get_audio_quiz(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes::get_quiz_of_kind(&pool, id, QuizKind::Audio)
        .await?
        .ok_or(AppError::NotFound("Audio quiz not found".to_string()))?;

    Ok(Json(QuizDetail::new(quiz, &media)))
}

/// Records one attempt at a quiz. Anonymous attempts omit `user`.
pub async fn submit_attempt(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !quizzes::quiz_exists(&pool, payload.quiz).await? {
        return Err(AppError::BadRequest(format!(
            "Invalid quiz id {}: object does not exist.",
            payload.quiz
        )));
    }
    if let Some(user) = payload.user {
        if !quizzes::user_exists(&pool, user).await? {
            return Err(AppError::BadRequest(format!(
                "Invalid user id {}: object does not exist.",
                user
            )));
        }
    }

    let attempt = quizzes::record_attempt(&pool, &payload).await.map_err(|e| {
        tracing::error!("Failed to record attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Attempt {} recorded for quiz {}", attempt.id, attempt.quiz);

    Ok((StatusCode::CREATED, Json(attempt)))
}
