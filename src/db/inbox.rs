// src/db/inbox.rs
//
// Rows created by visitors: contact messages and newsletter subscribers.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{contact::ContactMessage, subscriber::Subscriber};

pub async fn create_message(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    message: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO contact_messages (name, email, message, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(message)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Unread first, then newest first. `is_read` narrows to one state.
pub async fn list_messages(
    pool: &SqlitePool,
    is_read: Option<bool>,
) -> Result<Vec<ContactMessage>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, name, email, message, created_at, is_read FROM contact_messages",
    );
    if let Some(is_read) = is_read {
        builder.push(" WHERE is_read = ");
        builder.push_bind(is_read);
    }
    builder.push(" ORDER BY is_read ASC, created_at DESC, id DESC");

    builder.build_query_as::<ContactMessage>().fetch_all(pool).await
}

/// Fetches a message and marks it read, as opening it in the inbox does.
pub async fn open_message(pool: &SqlitePool, id: i64) -> Result<Option<ContactMessage>, sqlx::Error> {
    sqlx::query_as::<_, ContactMessage>(
        r#"
        UPDATE contact_messages SET is_read = TRUE WHERE id = ?
        RETURNING id, name, email, message, created_at, is_read
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_message_read(pool: &SqlitePool, id: i64, is_read: bool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE contact_messages SET is_read = ? WHERE id = ?")
        .bind(is_read)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Get-or-create. Returns true when a new subscriber row was inserted.
pub async fn subscribe(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO subscribers (email, created_at) VALUES (?, ?) ON CONFLICT(email) DO NOTHING",
    )
    .bind(email)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Plain insert; a duplicate email surfaces as a UNIQUE violation.
pub async fn create_subscriber(pool: &SqlitePool, email: &str) -> Result<Subscriber, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        "INSERT INTO subscribers (email, created_at) VALUES (?, ?) RETURNING id, email, created_at",
    )
    .bind(email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn list_subscribers(pool: &SqlitePool) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        "SELECT id, email, created_at FROM subscribers ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn delete_subscriber(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM subscribers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
