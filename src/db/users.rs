// src/db/users.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{error::AppError, models::user::User, utils::hash::hash_password};

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Creates the configured admin account if it does not exist yet.
/// Returns true when an account was created.
pub async fn seed_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, AppError> {
    if find_by_username(pool, username).await?.is_some() {
        return Ok(false);
    }

    tracing::info!("Seeding admin user: {}", username);
    let hashed_password = hash_password(password)?;

    sqlx::query("INSERT INTO users (username, password, role, created_at) VALUES (?, ?, 'admin', ?)")
        .bind(username)
        .bind(hashed_password)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    tracing::info!("Admin user created successfully.");
    Ok(true)
}
