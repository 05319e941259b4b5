// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    error::AppError,
    handlers::{admin, auth, lessons, media, pages, quiz, subscription},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public JSON API under `/api`, admin API under `/api/admin`.
/// * Server-rendered pages at the site root.
/// * Static files and uploaded media served from disk.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/lessons/", get(lessons::list_lessons))
        .route("/api/lessons/{id}/", get(lessons::get_lesson))
        .route("/api/quizzes/", get(quiz::list_quizzes))
        .route("/api/quizzes/{id}/", get(quiz::get_quiz))
        .route("/api/quizzes/visual-quiz/{id}/", get(quiz::get_visual_quiz))
        .route("/api/quizzes/audio-quiz/{id}/", get(quiz::get_audio_quiz))
        .route("/api/quizzes/submit/", post(quiz::submit_attempt))
        .route("/api/subscribe/", post(subscription::api_subscribe));

    let admin_routes = Router::new()
        .route(
            "/api/admin/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route("/api/admin/lessons", get(admin::list_lessons).post(admin::create_lesson))
        .route(
            "/api/admin/lessons/{id}",
            get(admin::get_lesson)
                .put(admin::update_lesson)
                .delete(admin::delete_lesson),
        )
        .route("/api/admin/lessons/{id}/blocks", post(admin::create_block))
        .route(
            "/api/admin/blocks/{id}",
            put(admin::update_block).delete(admin::delete_block),
        )
        .route(
            "/api/admin/worksheets",
            get(admin::list_worksheets).post(admin::create_worksheet),
        )
        .route(
            "/api/admin/worksheets/{id}",
            get(admin::get_worksheet)
                .put(admin::update_worksheet)
                .delete(admin::delete_worksheet),
        )
        .route("/api/admin/posts", get(admin::list_posts).post(admin::create_post))
        .route(
            "/api/admin/posts/{id}",
            get(admin::get_post).put(admin::update_post).delete(admin::delete_post),
        )
        .route("/api/admin/quizzes", get(admin::list_quizzes).post(admin::create_quiz))
        .route(
            "/api/admin/quizzes/{id}",
            get(admin::get_quiz).put(admin::update_quiz).delete(admin::delete_quiz),
        )
        .route("/api/admin/quizzes/{id}/content", put(admin::replace_quiz_content))
        .route("/api/admin/quizzes/{id}/form", get(admin::quiz_form_descriptor))
        .route("/api/admin/forms", get(admin::list_forms))
        .route("/api/admin/forms/{model}", get(admin::form_descriptor))
        .route("/api/admin/messages", get(admin::list_messages))
        .route(
            "/api/admin/messages/{id}",
            get(admin::open_message).put(admin::mark_message),
        )
        .route("/api/admin/subscribers", get(admin::list_subscribers))
        .route(
            "/api/admin/subscribers/{id}",
            axum::routing::delete(admin::delete_subscriber),
        )
        .route(
            "/api/admin/media/{kind}",
            post(media::upload).layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/about/", get(pages::about))
        .route("/lessons/", get(pages::lesson_list))
        .route("/lessons/lessons/{age_group}/", get(pages::lesson_list_by_age))
        .route("/lessons/search/", get(pages::search))
        .route("/lessons/show-all/", get(pages::lessons_show_all))
        .route("/lessons/worksheets/show-all/", get(pages::worksheets_show_all))
        .route("/lessons/{id}/", get(pages::lesson_detail))
        .route("/resources/", get(pages::resources))
        .route("/resources/{id}/", get(pages::resource_detail))
        .route("/blog/", get(pages::blog_list))
        .route("/blog/{slug}/", get(pages::blog_detail))
        .route("/contact/", get(pages::contact_page).post(pages::contact_submit))
        .route("/subscribe/", post(subscription::subscribe));

    let mut router = Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .merge(page_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_root));

    let media_mount = state.config.media_url.trim_end_matches('/');
    if !media_mount.is_empty() {
        router = router.nest_service(media_mount, ServeDir::new(&state.config.media_root));
    }

    router
        .fallback(|| async { AppError::NotFound("Not found".to_string()) })
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
