// src/handlers/pages.rs
//
// Server-rendered pages. Each one remembers the active language in a cookie
// and consumes the pending flash notice.

use axum::{
    Form,
    extract::{OriginalUri, Path, Query, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{blog, inbox, lessons, quizzes, worksheets},
    error::AppError,
    flash::{self, Flash},
    i18n::{self, ActiveLang, Lang},
    models::contact::ContactForm,
    utils::{
        media::MediaUrls,
        pagination::{PAGE_SIZE, paginate},
        search::SearchFilter,
    },
    views::{self, PageMeta, lessons::{ListFilters, SearchResults}},
};

/// Latest posts shown on the home page.
const HOME_POSTS: i64 = 4;

/// Items per kind shown on the search page.
const SEARCH_PREVIEW: usize = 6;

struct Chrome {
    jar: CookieJar,
    lang: Lang,
    path: String,
    query: Option<String>,
    lang_switcher: bool,
    /// Shown on this render instead of the pending cookie notice.
    immediate: Option<Flash>,
}

impl Chrome {
    fn new(jar: CookieJar, lang: Lang, uri: &OriginalUri) -> Self {
        Self {
            jar,
            lang,
            path: uri.path().to_string(),
            query: uri.query().map(String::from),
            lang_switcher: true,
            immediate: None,
        }
    }

    fn without_switcher(mut self) -> Self {
        self.lang_switcher = false;
        self
    }

    fn with_flash(mut self, flash: Flash) -> Self {
        self.immediate = Some(flash);
        self
    }

    fn render(self, title: &str, body: Markup) -> (CookieJar, Html<String>) {
        let (jar, pending) = flash::take(self.jar);
        let jar = i18n::remember(jar, self.lang);
        let meta = PageMeta {
            lang: self.lang,
            flash: self.immediate.or(pending),
            path: self.path,
            query: self.query,
            lang_switcher: self.lang_switcher,
        };
        (jar, Html(views::page(&meta, title, body).into_string()))
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::InternalServerError(e.to_string())
    }
}

pub async fn home(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
) -> Result<impl IntoResponse, AppError> {
    let posts = blog::list_published(&pool, Some(HOME_POSTS))
        .await
        .map_err(db_error("Failed to load latest posts"))?;

    let title = t!("nav.home", locale = lang.code());
    Ok(Chrome::new(jar, lang, &uri).render(&title, views::pages::home(lang, &posts, &media)))
}

pub async fn about(ActiveLang(lang): ActiveLang, jar: CookieJar, uri: OriginalUri) -> impl IntoResponse {
    let title = t!("about.heading", locale = lang.code());
    Chrome::new(jar, lang, &uri).render(&title, views::pages::about(lang))
}

#[derive(Debug, Default, Deserialize)]
pub struct LessonListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
}

pub async fn lesson_list(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Query(params): Query<LessonListParams>,
) -> Result<impl IntoResponse, AppError> {
    render_lesson_list(pool, lang, media, Chrome::new(jar, lang, &uri), None, params).await
}

pub async fn lesson_list_by_age(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Path(age_group): Path<String>,
    Query(params): Query<LessonListParams>,
) -> Result<impl IntoResponse, AppError> {
    render_lesson_list(pool, lang, media, Chrome::new(jar, lang, &uri), Some(age_group), params).await
}

async fn render_lesson_list(
    pool: SqlitePool,
    lang: Lang,
    media: MediaUrls,
    chrome: Chrome,
    age_group: Option<String>,
    params: LessonListParams,
) -> Result<(CookieJar, Html<String>), AppError> {
    // Junk category ids are ignored on pages.
    let category = params.category.as_deref().and_then(|c| c.trim().parse::<i64>().ok());

    let categories = lessons::list_categories(&pool)
        .await
        .map_err(db_error("Failed to list categories"))?;
    let found = lessons::list_lessons(&pool, age_group.as_deref(), category)
        .await
        .map_err(db_error("Failed to list lessons"))?;
    let found = SearchFilter::new(params.q.as_deref(), None).apply(found);

    let page = paginate(found, PAGE_SIZE, params.page.as_deref());
    let filters = ListFilters {
        age_group,
        category,
        query: params.q.unwrap_or_default().trim().to_string(),
    };

    let title = t!("lessons.heading", locale = lang.code());
    let body = views::lessons::list(lang, &page, &categories, &filters, &media);
    Ok(chrome.render(&title, body))
}

pub async fn lesson_detail(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = lessons::get_lesson(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Lesson not found".to_string()))?;

    let blocks = lessons::blocks_for(&pool, &[id]).await?.remove(&id).unwrap_or_default();
    let related_quizzes = quizzes::quizzes_for_lesson(&pool, id).await?;
    let related_worksheets = worksheets::worksheets_for_lesson(&pool, id).await?;

    let body = views::lessons::detail(lang, &lesson, &blocks, &related_quizzes, &related_worksheets, &media);
    Ok(Chrome::new(jar, lang, &uri).render(lesson.title_in(lang), body))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub age_group: Option<String>,
}

/// Combined search over lessons, quizzes and worksheets.
/// An empty query searches nothing.
pub async fn search(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::new(params.q.as_deref(), params.age_group.as_deref());
    let mut results = SearchResults {
        query: filter.query.clone().unwrap_or_default(),
        age_group: filter.age_group.clone(),
        ..SearchResults::default()
    };

    if filter.has_query() {
        let mut found_lessons = filter.apply(lessons::list_lessons(&pool, None, None).await?);
        let mut found_quizzes = filter.apply(quizzes::list_quizzes(&pool).await?);
        let mut found_worksheets = filter.apply(worksheets::list_worksheets(&pool).await?);

        results.lessons_count = found_lessons.len();
        results.quizzes_count = found_quizzes.len();
        results.worksheets_count = found_worksheets.len();

        found_lessons.truncate(SEARCH_PREVIEW);
        found_quizzes.truncate(SEARCH_PREVIEW);
        found_worksheets.truncate(SEARCH_PREVIEW);

        results.lessons = found_lessons;
        results.quizzes = found_quizzes;
        results.worksheets = found_worksheets;

        tracing::debug!(
            "Search '{}' matched {} lessons, {} quizzes, {} worksheets",
            results.query,
            results.lessons_count,
            results.quizzes_count,
            results.worksheets_count
        );
    }

    let title = t!("search.button", locale = lang.code());
    let body = views::lessons::search(lang, &results, &media);
    Ok(Chrome::new(jar, lang, &uri).without_switcher().render(&title, body))
}

pub async fn lessons_show_all(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::new(params.q.as_deref(), params.age_group.as_deref());
    let found = filter.apply(lessons::list_lessons(&pool, None, None).await?);

    let query = filter.query.as_deref().unwrap_or_default();
    let title = t!("lessons.heading", locale = lang.code());
    let body = views::lessons::show_all(lang, &found, query, filter.age_group.as_deref(), &media);
    Ok(Chrome::new(jar, lang, &uri).without_switcher().render(&title, body))
}

pub async fn worksheets_show_all(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::new(params.q.as_deref(), params.age_group.as_deref());
    let found = filter.apply(worksheets::list_worksheets(&pool).await?);

    let query = filter.query.as_deref().unwrap_or_default();
    let title = t!("worksheets.heading", locale = lang.code());
    let body = views::worksheets::show_all(lang, &found, query, filter.age_group.as_deref(), &media);
    Ok(Chrome::new(jar, lang, &uri).without_switcher().render(&title, body))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceListParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

pub async fn resources(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Query(params): Query<ResourceListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::new(params.q.as_deref(), None);
    let found = filter.apply(
        worksheets::list_worksheets(&pool)
            .await
            .map_err(db_error("Failed to list worksheets"))?,
    );
    let page = paginate(found, PAGE_SIZE, params.page.as_deref());

    let query = filter.query.as_deref().unwrap_or_default();
    let title = t!("worksheets.heading", locale = lang.code());
    let body = views::worksheets::list(lang, &page, query, &media);
    Ok(Chrome::new(jar, lang, &uri).render(&title, body))
}

pub async fn resource_detail(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let worksheet = worksheets::get_worksheet(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Worksheet not found".to_string()))?;

    let body = views::worksheets::detail(lang, &worksheet, &media);
    Ok(Chrome::new(jar, lang, &uri).render(&worksheet.title, body))
}

pub async fn blog_list(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
) -> Result<impl IntoResponse, AppError> {
    let posts = blog::list_published(&pool, None)
        .await
        .map_err(db_error("Failed to list posts"))?;

    let title = t!("blog.heading", locale = lang.code());
    Ok(Chrome::new(jar, lang, &uri).render(&title, views::blog::list(lang, &posts, &media)))
}

/// Published posts only; drafts are a 404.
pub async fn blog_detail(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    media: MediaUrls,
    jar: CookieJar,
    uri: OriginalUri,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = blog::get_published_by_slug(&pool, &slug)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    let body = views::blog::detail(lang, &post, &media);
    Ok(Chrome::new(jar, lang, &uri).render(post.title_in(lang), body))
}

pub async fn contact_page(ActiveLang(lang): ActiveLang, jar: CookieJar, uri: OriginalUri) -> impl IntoResponse {
    let title = t!("contact.heading", locale = lang.code());
    Chrome::new(jar, lang, &uri).render(&title, views::pages::contact(lang, &ContactForm::default()))
}

/// Stores the message and redirects back to the form. A missing field
/// re-renders the form with an error notice instead.
pub async fn contact_submit(
    State(pool): State<SqlitePool>,
    ActiveLang(lang): ActiveLang,
    jar: CookieJar,
    uri: OriginalUri,
    Form(form): Form<ContactForm>,
) -> Result<axum::response::Response, AppError> {
    let Some((name, email, message)) = form.complete() else {
        let title = t!("contact.heading", locale = lang.code());
        let page = Chrome::new(jar, lang, &uri)
            .with_flash(Flash::ContactMissingFields)
            .render(&title, views::pages::contact(lang, &form));
        return Ok(page.into_response());
    };

    let id = inbox::create_message(&pool, name, email, message)
        .await
        .map_err(db_error("Failed to store contact message"))?;
    tracing::info!("Contact message {} received from {}", id, email);

    let jar = flash::set(jar, Flash::ContactSent);
    Ok((jar, Redirect::to(&format!("/contact/?lang={}", lang.code()))).into_response())
}
