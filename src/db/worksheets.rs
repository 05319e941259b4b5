// src/db/worksheets.rs

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::worksheet::{CreateWorksheetRequest, UpdateWorksheetRequest, Worksheet};

const WORKSHEET_COLUMNS: &str =
    "SELECT id, title, description, lesson_id, file, image, uploaded_at, age_group FROM worksheets";

/// Every worksheet, newest upload first.
pub async fn list_worksheets(pool: &SqlitePool) -> Result<Vec<Worksheet>, sqlx::Error> {
    sqlx::query_as::<_, Worksheet>(&format!("{} ORDER BY uploaded_at DESC, id DESC", WORKSHEET_COLUMNS))
        .fetch_all(pool)
        .await
}

pub async fn worksheets_for_lesson(
    pool: &SqlitePool,
    lesson_id: i64,
) -> Result<Vec<Worksheet>, sqlx::Error> {
    sqlx::query_as::<_, Worksheet>(&format!(
        "{} WHERE lesson_id = ? ORDER BY uploaded_at DESC, id DESC",
        WORKSHEET_COLUMNS
    ))
    .bind(lesson_id)
    .fetch_all(pool)
    .await
}

pub async fn get_worksheet(pool: &SqlitePool, id: i64) -> Result<Option<Worksheet>, sqlx::Error> {
    sqlx::query_as::<_, Worksheet>(&format!("{} WHERE id = ?", WORKSHEET_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_worksheet(
    pool: &SqlitePool,
    req: &CreateWorksheetRequest,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO worksheets (title, description, lesson_id, file, image, uploaded_at, age_group)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.lesson_id)
    .bind(&req.file)
    .bind(&req.image)
    .bind(Utc::now())
    .bind(&req.age_group)
    .fetch_one(pool)
    .await
}

pub async fn update_worksheet(
    pool: &SqlitePool,
    id: i64,
    req: UpdateWorksheetRequest,
) -> Result<Option<u64>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE worksheets SET ");
    let mut separated = builder.separated(", ");
    let mut touched = false;

    if let Some(title) = req.title {
        separated.push("title = ");
        separated.push_bind_unseparated(title);
        touched = true;
    }
    if let Some(description) = req.description {
        separated.push("description = ");
        separated.push_bind_unseparated(description);
        touched = true;
    }
    if let Some(lesson_id) = req.lesson_id {
        separated.push("lesson_id = ");
        separated.push_bind_unseparated(lesson_id);
        touched = true;
    }
    if let Some(file) = req.file {
        separated.push("file = ");
        separated.push_bind_unseparated(file);
        touched = true;
    }
    if let Some(image) = req.image {
        separated.push("image = ");
        separated.push_bind_unseparated(image);
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

pub async fn delete_worksheet(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM worksheets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
