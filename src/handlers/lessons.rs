// src/handlers/lessons.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::lessons,
    error::AppError,
    serializers::lesson::LessonOut,
    utils::{media::MediaUrls, search::SearchFilter},
};

/// Query parameters for listing lessons. Blank values are ignored.
#[derive(Debug, Deserialize)]
pub struct LessonListParams {
    pub age_group: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lists lessons with their blocks, optionally filtered by age group,
/// category and a search term matched against every language.
pub async fn list_lessons(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Query(params): Query<LessonListParams>,
) -> Result<impl IntoResponse, AppError> {
    let category = match non_blank(params.category.as_deref()) {
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid category '{}'", raw)))?,
        ),
        None => None,
    };

    let found = lessons::list_lessons(&pool, non_blank(params.age_group.as_deref()), category)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list lessons: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    let found = SearchFilter::new(params.q.as_deref(), None).apply(found);

    let ids: Vec<i64> = found.iter().map(|l| l.id).collect();
    let mut blocks = lessons::blocks_for(&pool, &ids).await?;

    let body: Vec<LessonOut> = found
        .into_iter()
        .map(|lesson| {
            let lesson_blocks = blocks.remove(&lesson.id).unwrap_or_default();
            LessonOut::new(lesson, lesson_blocks, &media)
        })
        .collect();

    Ok(Json(body))
}

/// Retrieves a single lesson with its blocks.
pub async fn get_lesson(
    State(pool): State<SqlitePool>,
    media: MediaUrls,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = lessons::get_lesson(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Lesson not found".to_string()))?;

    let blocks = lessons::blocks_for(&pool, &[id])
        .await?
        .remove(&id)
        .unwrap_or_default();

    Ok(Json(LessonOut::new(lesson, blocks, &media)))
}
