// src/db/lessons.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::lesson::{
    CategoryRequest, CreateBlockRequest, CreateLessonRequest, Lesson, LessonBlock,
    LessonCategory, UpdateBlockRequest, UpdateLessonRequest,
};

const LESSON_COLUMNS: &str = r#"
    SELECT
        l.id, l.category_id,
        c.name AS category_name, c.sort_order AS category_order,
        l.title, l.title_sr, l.title_de,
        l.description, l.description_sr, l.description_de,
        l.video_url, l.video_file, l.image,
        l.created_at, l.sort_order, l.age_group
    FROM lessons l
    JOIN lesson_categories c ON c.id = l.category_id
"#;

const LESSON_ORDER: &str = " ORDER BY c.sort_order, l.sort_order, l.created_at";

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<LessonCategory>, sqlx::Error> {
    sqlx::query_as::<_, LessonCategory>(
        "SELECT id, name, sort_order FROM lesson_categories ORDER BY sort_order, name",
    )
    .fetch_all(pool)
    .await
}

/// Lessons in display order, optionally narrowed to an age group and category.
pub async fn list_lessons(
    pool: &SqlitePool,
    age_group: Option<&str>,
    category_id: Option<i64>,
) -> Result<Vec<Lesson>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(LESSON_COLUMNS);
    builder.push(" WHERE 1 = 1");
    if let Some(age_group) = age_group {
        builder.push(" AND l.age_group = ");
        builder.push_bind(age_group.to_string());
    }
    if let Some(category_id) = category_id {
        builder.push(" AND l.category_id = ");
        builder.push_bind(category_id);
    }
    builder.push(LESSON_ORDER);

    builder.build_query_as::<Lesson>().fetch_all(pool).await
}

pub async fn get_lesson(pool: &SqlitePool, id: i64) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!("{} WHERE l.id = ?", LESSON_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Blocks of the given lessons, grouped by lesson and in playback order.
pub async fn blocks_for(
    pool: &SqlitePool,
    lesson_ids: &[i64],
) -> Result<HashMap<i64, Vec<LessonBlock>>, sqlx::Error> {
    let mut grouped: HashMap<i64, Vec<LessonBlock>> = HashMap::new();
    if lesson_ids.is_empty() {
        return Ok(grouped);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, lesson_id, title, title_sr, title_de, video, block_type, sort_order
         FROM lesson_blocks WHERE lesson_id IN (",
    );
    let mut separated = builder.separated(",");
    for id in lesson_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY sort_order, id");

    let blocks = builder.build_query_as::<LessonBlock>().fetch_all(pool).await?;
    for block in blocks {
        grouped.entry(block.lesson_id).or_default().push(block);
    }
    Ok(grouped)
}

pub async fn create_category(pool: &SqlitePool, req: &CategoryRequest) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO lesson_categories (name, sort_order) VALUES (?, ?) RETURNING id")
        .bind(&req.name)
        .bind(req.order)
        .fetch_one(pool)
        .await
}

pub async fn update_category(
    pool: &SqlitePool,
    id: i64,
    req: &CategoryRequest,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE lesson_categories SET name = ?, sort_order = ? WHERE id = ?")
        .bind(&req.name)
        .bind(req.order)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Deleting a category cascades to its lessons.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lesson_categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn create_lesson(pool: &SqlitePool, req: &CreateLessonRequest) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO lessons
        (category_id, title, title_sr, title_de, description, description_sr, description_de,
         video_url, video_file, image, created_at, sort_order, age_group)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(req.category_id)
    .bind(&req.title)
    .bind(&req.title_sr)
    .bind(&req.title_de)
    .bind(&req.description)
    .bind(&req.description_sr)
    .bind(&req.description_de)
    .bind(&req.video_url)
    .bind(&req.video_file)
    .bind(&req.image)
    .bind(Utc::now())
    .bind(req.order)
    .bind(req.age_group.as_deref().unwrap_or("4-5"))
    .fetch_one(pool)
    .await
}

/// Applies the present fields only. Returns the number of rows touched,
/// or `None` when the request carried nothing to change.
pub async fn update_lesson(
    pool: &SqlitePool,
    id: i64,
    req: UpdateLessonRequest,
) -> Result<Option<u64>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE lessons SET ");
    let mut separated = builder.separated(", ");
    let mut touched = false;

    macro_rules! set {
        ($column:literal, $value:expr) => {
            if let Some(value) = $value {
                separated.push(concat!($column, " = "));
                separated.push_bind_unseparated(value);
                touched = true;
            }
        };
    }

    set!("category_id", req.category_id);
    set!("title", req.title);
    set!("title_sr", req.title_sr);
    set!("title_de", req.title_de);
    set!("description", req.description);
    set!("description_sr", req.description_sr);
    set!("description_de", req.description_de);
    set!("video_url", req.video_url);
    set!("video_file", req.video_file);
    set!("image", req.image);
    set!("sort_order", req.order);
    set!("age_group", req.age_group);

    if !touched {
        return Ok(None);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(pool).await?;
    Ok(Some(result.rows_affected()))
}

/// Blocks cascade; quizzes and worksheets are detached.
pub async fn delete_lesson(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn create_block(
    pool: &SqlitePool,
    lesson_id: i64,
    req: &CreateBlockRequest,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO lesson_blocks (lesson_id, title, title_sr, title_de, video, block_type, sort_order)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(lesson_id)
    .bind(&req.title)
    .bind(&req.title_sr)
    .bind(&req.title_de)
    .bind(&req.video)
    .bind(req.block_type.as_deref().unwrap_or("explain"))
    .bind(req.order)
    .fetch_one(pool)
    .await
}

pub async fn update_block(
    pool: &SqlitePool,
    id: i64,
    req: UpdateBlockRequest,
) -> Result<Option<u64>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE lesson_blocks SET ");
    let mut separated = builder.separated(", ");
    let mut touched = false;

    if let Some(title) = req.title {
        separated.push("title = ");
        separated.push_bind_unseparated(title);
        touched = true;
    }
    if let Some(title_sr) = req.title_sr {
        separated.push("title_sr = ");
        separated.push_bind_unseparated(title_sr);
        touched = true;
    }
    if let Some(title_de) = req.title_de {
        separated.push("title_de = ");
        separated.push_bind_unseparated(title_de);
        touched = true;
    }
    if let Some(video) = req.video {
        separated.push("video = ");
        separated.push_bind_unseparated(video);
        touched = true;
    }
    if let Some(block_type) = req.block_type {
        separated.push("block_type = ");
        separated.push_bind_unseparated(block_type);
        touched = true;
    }
    if let Some(order) = req.order {
        separated.push("sort_order = ");
        separated.push_bind_unseparated(order);
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

pub async fn delete_block(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lesson_blocks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
