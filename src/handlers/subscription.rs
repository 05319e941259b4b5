// src/handlers/subscription.rs

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use sqlx::SqlitePool;
use url::Url;
use validator::Validate;

use crate::{
    db::inbox,
    error::{AppError, is_unique_violation},
    flash::{self, Flash},
    models::subscriber::{SubscribeForm, SubscribeRequest},
};

/// Creates a subscriber. A repeated email is a 409.
pub async fn api_subscribe(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let subscriber = inbox::create_subscriber(&pool, payload.email.trim())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Subscriber with this email already exists.".to_string())
            } else {
                tracing::error!("Failed to create subscriber: {:?}", e);
                AppError::from(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(subscriber)))
}

/// Newsletter form in the page footer: get-or-create, then back to the page
/// the visitor came from.
pub async fn subscribe(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<SubscribeForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = form.email.as_deref().map(str::trim).unwrap_or_default();

    let notice = if email.is_empty() {
        Flash::SubscribeMissingEmail
    } else if inbox::subscribe(&pool, email).await? {
        tracing::info!("New subscriber: {}", email);
        Flash::Subscribed
    } else {
        Flash::AlreadySubscribed
    };

    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(local_target)
        .unwrap_or_else(|| "/".to_string());

    Ok((flash::set(jar, notice), Redirect::to(&back)))
}

/// Path and query of a Referer value, so the redirect never leaves the site.
/// Targets a browser would read as another host (`//host`, `/\host`) fall
/// back to the home page.
fn local_target(referer: &str) -> Option<String> {
    let target = if referer.starts_with('/') {
        referer.to_string()
    } else {
        let url = Url::parse(referer).ok()?;
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    };

    if target.starts_with("//") || target.starts_with("/\\") {
        return Some("/".to_string());
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::local_target;

    #[test]
    fn referer_is_reduced_to_a_local_path() {
        assert_eq!(
            local_target("http://kids.example/blog/?lang=de").as_deref(),
            Some("/blog/?lang=de")
        );
        assert_eq!(local_target("/lessons/").as_deref(), Some("/lessons/"));
        assert_eq!(local_target("https://evil.example").as_deref(), Some("/"));
        assert_eq!(local_target("not a url"), None);
    }

    #[test]
    fn referer_cannot_point_at_another_host() {
        assert_eq!(
            local_target("https://evil.example//evil.example/phish").as_deref(),
            Some("/")
        );
        assert_eq!(local_target("//evil.example/phish").as_deref(), Some("/"));
        assert_eq!(local_target("/\\evil.example").as_deref(), Some("/"));
        assert_eq!(local_target("http://kids.example/\\evil.example").as_deref(), Some("/"));
    }
}
