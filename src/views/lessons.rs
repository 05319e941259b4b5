// src/views/lessons.rs

use maud::{Markup, html};
use rust_i18n::t;

use super::components::{age_select, pager, thumbnail};
use crate::{
    i18n::Lang,
    models::{
        lesson::{Lesson, LessonBlock, LessonCategory, age_label},
        quiz::Quiz,
        worksheet::Worksheet,
    },
    utils::{media::MediaUrls, pagination::Page},
};

/// Filters echoed back into the lesson list page.
#[derive(Debug, Default)]
pub struct ListFilters {
    pub age_group: Option<String>,
    pub category: Option<i64>,
    pub query: String,
}

/// Search previews and totals per kind of content.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub query: String,
    pub age_group: Option<String>,
    pub lessons: Vec<Lesson>,
    pub lessons_count: usize,
    pub quizzes: Vec<Quiz>,
    pub quizzes_count: usize,
    pub worksheets: Vec<Worksheet>,
    pub worksheets_count: usize,
}

pub fn card(lesson: &Lesson, lang: Lang, media: &MediaUrls) -> Markup {
    html! {
        article.lesson-card {
            a href=(format!("/lessons/{}/", lesson.id)) {
                (thumbnail(media.relative(lesson.image.as_deref()).as_deref(), lesson.title_in(lang)))
                h3 { (lesson.title_in(lang)) }
            }
            p.meta {
                (lesson.category_name)
                @if let Some(label) = age_label(&lesson.age_group) {
                    " · " (label)
                }
            }
        }
    }
}

pub fn list(
    lang: Lang,
    page: &Page<Lesson>,
    categories: &[LessonCategory],
    filters: &ListFilters,
    media: &MediaUrls,
) -> Markup {
    let locale = lang.code();
    let category = filters.category.map(|c| c.to_string()).unwrap_or_default();
    let heading = match filters.age_group.as_deref() {
        Some(age) => t!("lessons.age_heading", locale = locale, age = age_label(age).unwrap_or(age)).into_owned(),
        None => t!("lessons.heading", locale = locale).into_owned(),
    };

    html! {
        h1 { (heading) }
        form.filters method="get" {
            input type="search" name="q" value=(filters.query);
            select name="category" {
                option value="" { (t!("lessons.all_categories", locale = locale)) }
                @for c in categories {
                    option value=(c.id) selected[filters.category == Some(c.id)] { (c.name) }
                }
            }
            button type="submit" { (t!("search.button", locale = locale)) }
        }
        p.count { (t!("lessons.count", locale = locale, count = page.count)) }
        @if page.items.is_empty() {
            p.empty { (t!("lessons.empty", locale = locale)) }
        } @else {
            div.grid {
                @for lesson in &page.items {
                    (card(lesson, lang, media))
                }
            }
        }
        (pager(page, &[("q", filters.query.as_str()), ("category", category.as_str())], locale))
    }
}

fn player(lesson: &Lesson, blocks: &[LessonBlock], lang: Lang, media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        @if !blocks.is_empty() {
            section.blocks {
                h2 { (t!("lessons.blocks", locale = locale)) }
                @for block in blocks {
                    article class=(format!("block block-{}", block.block_type)) {
                        h3 { (block.title_in(lang)) }
                        @if let Some(src) = media.relative(block.video.as_deref()) {
                            video controls src=(src) {}
                        }
                    }
                }
            }
        } @else if let Some(embed) = lesson.embed_video_url() {
            iframe.video src=(embed) allowfullscreen {}
        } @else if let Some(src) = media.relative(lesson.video_file.as_deref()) {
            video controls src=(src) {}
        }
    }
}

pub fn detail(
    lang: Lang,
    lesson: &Lesson,
    blocks: &[LessonBlock],
    quizzes: &[Quiz],
    worksheets: &[Worksheet],
    media: &MediaUrls,
) -> Markup {
    let locale = lang.code();
    html! {
        article.lesson {
            h1 { (lesson.title_in(lang)) }
            p.meta { (lesson.category_name) }
            (thumbnail(media.relative(lesson.image.as_deref()).as_deref(), lesson.title_in(lang)))
            p.description { (lesson.description_in(lang)) }
            (player(lesson, blocks, lang, media))
        }
        @if !quizzes.is_empty() {
            section.related {
                h2 { (t!("lessons.related_quizzes", locale = locale)) }
                ul {
                    @for quiz in quizzes {
                        li { (quiz.title) " (" (quiz.kind().label()) ")" }
                    }
                }
            }
        }
        @if !worksheets.is_empty() {
            section.related {
                h2 { (t!("lessons.related_worksheets", locale = locale)) }
                ul {
                    @for w in worksheets {
                        li { a href=(format!("/resources/{}/", w.id)) { (w.title) } }
                    }
                }
            }
        }
    }
}

pub fn show_all(
    lang: Lang,
    lessons: &[Lesson],
    query: &str,
    age_group: Option<&str>,
    media: &MediaUrls,
) -> Markup {
    let locale = lang.code();
    html! {
        h1 { (t!("lessons.heading", locale = locale)) }
        form.filters method="get" {
            input type="search" name="q" value=(query);
            (age_select(age_group, locale))
            button type="submit" { (t!("search.button", locale = locale)) }
        }
        p.count { (t!("lessons.count", locale = locale, count = lessons.len())) }
        div.grid {
            @for lesson in lessons {
                (card(lesson, lang, media))
            }
        }
    }
}

pub fn search(lang: Lang, results: &SearchResults, media: &MediaUrls) -> Markup {
    let locale = lang.code();
    let age = results.age_group.as_deref().unwrap_or_default();
    let show_all = |path: &str| {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &results.query)
            .append_pair("age_group", age)
            .finish();
        format!("{}?{}", path, query)
    };

    html! {
        form.filters method="get" {
            input type="search" name="q" value=(results.query);
            (age_select(results.age_group.as_deref(), locale))
            button type="submit" { (t!("search.button", locale = locale)) }
        }
        @if results.query.is_empty() {
            p { (t!("search.enter_query", locale = locale)) }
        } @else {
            h1 { (t!("search.results_for", locale = locale, query = results.query)) }

            section.results {
                h2 { (t!("search.lessons", locale = locale, count = results.lessons_count)) }
                div.grid {
                    @for lesson in &results.lessons {
                        (card(lesson, lang, media))
                    }
                }
                @if results.lessons_count > results.lessons.len() {
                    a href=(show_all("/lessons/show-all/")) { (t!("search.show_all", locale = locale)) }
                }
            }

            section.results {
                h2 { (t!("search.quizzes", locale = locale, count = results.quizzes_count)) }
                ul {
                    @for quiz in &results.quizzes {
                        li { (quiz.title) }
                    }
                }
            }

            section.results {
                h2 { (t!("search.worksheets", locale = locale, count = results.worksheets_count)) }
                ul {
                    @for w in &results.worksheets {
                        li { a href=(format!("/resources/{}/", w.id)) { (w.title) } }
                    }
                }
                @if results.worksheets_count > results.worksheets.len() {
                    a href=(show_all("/lessons/worksheets/show-all/")) { (t!("search.show_all", locale = locale)) }
                }
            }

            @if results.lessons_count + results.quizzes_count + results.worksheets_count == 0 {
                p.empty { (t!("search.nothing", locale = locale)) }
            }
        }
    }
}
