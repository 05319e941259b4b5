// src/db/blog.rs

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    models::blog::{BlogPost, CreateBlogPostRequest, UpdateBlogPostRequest},
    utils::slug::{base_slug, candidates},
};

const POST_COLUMNS: &str = r#"
    SELECT id, title_en, title_sr, title_de, summary_en, summary_sr, summary_de,
           content_en, content_sr, content_de, image, slug, is_published, published_at
    FROM blog_posts
"#;

/// Published posts, newest first. `limit` caps the count when given.
pub async fn list_published(
    pool: &SqlitePool,
    limit: Option<i64>,
) -> Result<Vec<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!(
        "{} WHERE is_published = TRUE ORDER BY published_at DESC, id DESC LIMIT ?",
        POST_COLUMNS
    ))
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await
}

/// Posts including drafts, for the admin. `is_published` narrows to one state.
pub async fn list_all(
    pool: &SqlitePool,
    is_published: Option<bool>,
) -> Result<Vec<BlogPost>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(POST_COLUMNS);
    if let Some(is_published) = is_published {
        builder.push(" WHERE is_published = ");
        builder.push_bind(is_published);
    }
    builder.push(" ORDER BY published_at DESC, id DESC");

    builder.build_query_as::<BlogPost>().fetch_all(pool).await
}

pub async fn get_published_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!("{} WHERE slug = ? AND is_published = TRUE", POST_COLUMNS))
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(&format!("{} WHERE id = ?", POST_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn slug_taken(pool: &SqlitePool, slug: &str) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM blog_posts WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// First free slug derived from the English title: `title`, `title-2`, ...
///
/// Check-then-insert without a lock: two concurrent posts with the same
/// title can pick the same slug, and the loser hits the UNIQUE constraint.
pub async fn unique_slug(pool: &SqlitePool, title_en: &str) -> Result<String, sqlx::Error> {
    let base = base_slug(title_en);
    for candidate in candidates(&base) {
        if !slug_taken(pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(sqlx::Error::Protocol("slug candidates exhausted".to_string()))
}

/// Inserts a post, assigning a slug when none was supplied.
/// Returns the new id and the slug it was stored under.
pub async fn create_post(
    pool: &SqlitePool,
    req: &CreateBlogPostRequest,
) -> Result<(i64, String), sqlx::Error> {
    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => unique_slug(pool, &req.title_en).await?,
    };

    let id = sqlx::query_scalar(
        r#"
        INSERT INTO blog_posts
        (title_en, title_sr, title_de, summary_en, summary_sr, summary_de,
         content_en, content_sr, content_de, image, slug, is_published, published_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&req.title_en)
    .bind(&req.title_sr)
    .bind(&req.title_de)
    .bind(&req.summary_en)
    .bind(&req.summary_sr)
    .bind(&req.summary_de)
    .bind(&req.content_en)
    .bind(&req.content_sr)
    .bind(&req.content_de)
    .bind(&req.image)
    .bind(&slug)
    .bind(req.is_published.unwrap_or(true))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok((id, slug))
}

/// Updates content fields. The slug is never rewritten.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    req: UpdateBlogPostRequest,
) -> Result<Option<u64>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE blog_posts SET ");
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

    set!("title_en", req.title_en);
    set!("title_sr", req.title_sr);
    set!("title_de", req.title_de);
    set!("summary_en", req.summary_en);
    set!("summary_sr", req.summary_sr);
    set!("summary_de", req.summary_de);
    set!("content_en", req.content_en);
    set!("content_sr", req.content_sr);
    set!("content_de", req.content_de);
    set!("image", req.image);
    set!("is_published", req.is_published);

    if !touched {
        return Ok(None);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(pool).await?;
    Ok(Some(result.rows_affected()))
}

pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
