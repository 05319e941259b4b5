// src/handlers/admin.rs
//
// Content management API. Every route here sits behind the auth and admin
// middleware.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    admin::forms::{MODELS, form_for, quiz_form},
    db::{blog, inbox, lessons, quizzes, worksheets},
    error::{AppError, is_foreign_key_violation, is_unique_violation},
    models::{
        blog::{CreateBlogPostRequest, UpdateBlogPostRequest},
        contact::MarkReadRequest,
        lesson::{
            CategoryRequest, CreateBlockRequest, CreateLessonRequest, UpdateBlockRequest,
            UpdateLessonRequest,
        },
        quiz::{CreateQuizRequest, QuizContent, UpdateQuizRequest},
        worksheet::{CreateWorksheetRequest, UpdateWorksheetRequest},
    },
    serializers::worksheet::WorksheetOut,
    utils::{media::MediaUrls, search::SearchFilter},
};

fn validate<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|validation_errors| AppError::BadRequest(validation_errors.to_string()))
}

/// Maps write errors: broken references are the client's fault.
fn write_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        if is_foreign_key_violation(&e) {
            AppError::BadRequest(format!("{}: referenced record does not exist", context))
        } else if is_unique_violation(&e) {
            AppError::Conflict(format!("{}: record already exists", context))
        } else {
            tracing::error!("{}: {:?}", context, e);
            AppError::InternalServerError(e.to_string())
        }
    }
}

/// Turns the outcome of a partial update into a response.
fn updated(outcome: Option<u64>, what: &str) -> Result<StatusCode, AppError> {
    match outcome {
        None => Err(AppError::BadRequest("No fields to update".to_string())),
        Some(0) => Err(AppError::NotFound(format!("{} not found", what))),
        Some(_) => Ok(StatusCode::OK),
    }
}

fn deleted(rows: u64, what: &str) -> Result<StatusCode, AppError> {
    if rows == 0 {
        return Err(AppError::NotFound(format!("{} not found", what)));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn log_quiz_warnings(id: i64, content: &QuizContent) {
    for warning in content.warnings() {
        tracing::warn!("Quiz {}: {}", id, warning);
    }
}

// ---- Categories ----

pub async fn list_categories(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(lessons::list_categories(&pool).await?))
}

pub async fn create_category(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let id = lessons::create_category(&pool, &payload)
        .await
        .map_err(write_error("Failed to create category"))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let rows = lessons::update_category(&pool, id, &payload)
        .await
        .map_err(write_error("Failed to update category"))?;
    updated(Some(rows), "Category")
}

/// Removes a category together with its lessons.
pub async fn delete_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(lessons::delete_category(&pool, id).await?, "Category")
}

// ---- Lessons and blocks ----

#[derive(Debug, Default, Deserialize)]
pub struct AdminLessonParams {
    pub category: Option<i64>,
    pub age_group: Option<String>,
    /// Matched against titles and descriptions in every language.
    pub q: Option<String>,
}

pub async fn list_lessons(
    State(pool): State<SqlitePool>,
    Query(params): Query<AdminLessonParams>,
) -> Result<impl IntoResponse, AppError> {
    let found = lessons::list_lessons(&pool, non_blank(&params.age_group), params.category).await?;
    Ok(Json(SearchFilter::new(params.q.as_deref(), None).apply(found)))
}

pub async fn get_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = lessons::get_lesson(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Lesson not found".to_string()))?;
    let blocks = lessons::blocks_for(&pool, &[id]).await?.remove(&id).unwrap_or_default();

    Ok(Json(json!({ "lesson": lesson, "blocks": blocks })))
}

pub async fn create_lesson(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let id = lessons::create_lesson(&pool, &payload)
        .await
        .map_err(write_error("Failed to create lesson"))?;
    tracing::info!("Lesson {} created: {}", id, payload.title);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let outcome = lessons::update_lesson(&pool, id, payload)
        .await
        .map_err(write_error("Failed to update lesson"))?;
    updated(outcome, "Lesson")
}

/// Blocks cascade with the lesson; quizzes and worksheets are detached.
pub async fn delete_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(lessons::delete_lesson(&pool, id).await?, "Lesson")
}

pub async fn create_block(
    State(pool): State<SqlitePool>,
    Path(lesson_id): Path<i64>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let id = lessons::create_block(&pool, lesson_id, &payload)
        .await
        .map_err(write_error("Failed to create block"))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_block(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let outcome = lessons::update_block(&pool, id, payload)
        .await
        .map_err(write_error("Failed to update block"))?;
    updated(outcome, "Block")
}

pub async fn delete_block(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(lessons::delete_block(&pool, id).await?, "Block")
}

// ---- Worksheets ----

pub async fn list_worksheets(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
) -> Result<impl IntoResponse, AppError> {
    let body: Vec<WorksheetOut> = worksheets::list_worksheets(&pool)
        .await?
        .into_iter()
        .map(|w| WorksheetOut::new(w, &media))
        .collect();
    Ok(Json(body))
}

pub async fn get_worksheet(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let worksheet = worksheets::get_worksheet(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Worksheet not found".to_string()))?;
    Ok(Json(WorksheetOut::new(worksheet, &media)))
}

pub async fn create_worksheet(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateWorksheetRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let id = worksheets::create_worksheet(&pool, &payload)
        .await
        .map_err(write_error("Failed to create worksheet"))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_worksheet(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWorksheetRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let outcome = worksheets::update_worksheet(&pool, id, payload)
        .await
        .map_err(write_error("Failed to update worksheet"))?;
    updated(outcome, "Worksheet")
}

pub async fn delete_worksheet(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(worksheets::delete_worksheet(&pool, id).await?, "Worksheet")
}

// ---- Blog ----

#[derive(Debug, Default, Deserialize)]
pub struct AdminPostParams {
    pub is_published: Option<bool>,
    pub q: Option<String>,
}

/// Every post, drafts included unless `is_published` says otherwise.
pub async fn list_posts(
    State(pool): State<SqlitePool>,
    Query(params): Query<AdminPostParams>,
) -> Result<impl IntoResponse, AppError> {
    let found = blog::list_all(&pool, params.is_published).await?;
    Ok(Json(SearchFilter::new(params.q.as_deref(), None).apply(found)))
}

pub async fn get_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post = blog::get_post(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(post))
}

/// Creates a post. Without a slug one is derived from the English title;
/// a slug taken in the meantime is reported as a conflict.
pub async fn create_post(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let (id, slug) = blog::create_post(&pool, &payload).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("A post with this slug already exists".to_string())
        } else {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!("Post {} created with slug '{}'", id, slug);
    Ok((StatusCode::CREATED, Json(json!({ "id": id, "slug": slug }))))
}

pub async fn update_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let outcome = blog::update_post(&pool, id, payload)
        .await
        .map_err(write_error("Failed to update post"))?;
    updated(outcome, "Post")
}

pub async fn delete_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(blog::delete_post(&pool, id).await?, "Post")
}

// ---- Quizzes ----

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuizParams {
    pub quiz_type: Option<String>,
    pub difficulty: Option<String>,
}

pub async fn list_quizzes(
    State(pool): State<SqlitePool>,
    Query(params): Query<AdminQuizParams>,
) -> Result<impl IntoResponse, AppError> {
    let found = quizzes::filter_quizzes(
        &pool,
        non_blank(&params.quiz_type),
        non_blank(&params.difficulty),
    )
    .await?;
    Ok(Json(found))
}

pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes::get_quiz(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    Ok(Json(quiz))
}

pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let warnings = payload.content.warnings();
    let id = quizzes::create_quiz(&pool, payload)
        .await
        .map_err(write_error("Failed to create quiz"))?;
    for warning in warnings {
        tracing::warn!("Quiz {}: {}", id, warning);
    }

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Updates quiz metadata. The content is replaced through `replace_quiz_content`.
pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let outcome = quizzes::update_quiz(&pool, id, payload)
        .await
        .map_err(write_error("Failed to update quiz"))?;
    updated(outcome, "Quiz")
}

/// Replaces the whole content of a quiz. A content of another kind changes
/// the quiz type; nothing of the old kind is kept.
pub async fn replace_quiz_content(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(content): Json<QuizContent>,
) -> Result<impl IntoResponse, AppError> {
    let new_kind = content.kind();
    log_quiz_warnings(id, &content);

    let previous = quizzes::replace_content(&pool, id, content)
        .await
        .map_err(write_error("Failed to replace quiz content"))?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    if previous != new_kind.as_str() {
        tracing::info!("Quiz {} switched from {} to {}", id, previous, new_kind);
    }

    Ok(Json(json!({ "id": id, "quiz_type": new_kind })))
}

pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(quizzes::delete_quiz(&pool, id).await?, "Quiz")
}

/// Form of a persisted quiz, with the inline editors of its type.
pub async fn quiz_form_descriptor(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes::get_quiz(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    Ok(Json(quiz_form(Some(quiz.kind()))))
}

/// Creation form of a model.
/// Names accepted by `/api/admin/forms/{model}`.
pub async fn list_forms() -> impl IntoResponse {
    Json(json!({ "models": MODELS }))
}

pub async fn form_descriptor(Path(model): Path<String>) -> Result<impl IntoResponse, AppError> {
    let form = form_for(&model).ok_or(AppError::NotFound(format!("No form for '{}'", model)))?;
    Ok(Json(form))
}

// ---- Inbox ----

#[derive(Debug, Default, Deserialize)]
pub struct AdminMessageParams {
    pub is_read: Option<bool>,
    /// Matched against name, email and message.
    pub q: Option<String>,
}

pub async fn list_messages(
    State(pool): State<SqlitePool>,
    Query(params): Query<AdminMessageParams>,
) -> Result<impl IntoResponse, AppError> {
    let found = inbox::list_messages(&pool, params.is_read).await?;
    Ok(Json(SearchFilter::new(params.q.as_deref(), None).apply(found)))
}

/// Opening a message marks it read.
pub async fn open_message(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let message = inbox::open_message(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Message not found".to_string()))?;
    Ok(Json(message))
}

pub async fn mark_message(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<MarkReadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rows = inbox::set_message_read(&pool, id, payload.is_read).await?;
    updated(Some(rows), "Message")
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminSubscriberParams {
    pub q: Option<String>,
}

pub async fn list_subscribers(
    State(pool): State<SqlitePool>,
    Query(params): Query<AdminSubscriberParams>,
) -> Result<impl IntoResponse, AppError> {
    let found = inbox::list_subscribers(&pool).await?;
    Ok(Json(SearchFilter::new(params.q.as_deref(), None).apply(found)))
}

pub async fn delete_subscriber(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    deleted(inbox::delete_subscriber(&pool, id).await?, "Subscriber")
}
