// src/views/worksheets.rs

use maud::{Markup, html};
use rust_i18n::t;

use super::components::{age_select, pager, thumbnail};
use crate::{
    i18n::Lang,
    models::worksheet::Worksheet,
    utils::{media::MediaUrls, pagination::Page},
};

fn card(w: &Worksheet, media: &MediaUrls) -> Markup {
    html! {
        article.worksheet-card {
            a href=(format!("/resources/{}/", w.id)) {
                (thumbnail(media.relative(w.image.as_deref()).as_deref(), &w.title))
                h3 { (w.title) }
            }
        }
    }
}

pub fn list(lang: Lang, page: &Page<Worksheet>, query: &str, media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        h1 { (t!("worksheets.heading", locale = locale)) }
        form.filters method="get" {
            input type="search" name="q" value=(query);
            button type="submit" { (t!("search.button", locale = locale)) }
        }
        p.count { (t!("worksheets.count", locale = locale, count = page.count)) }
        @if page.items.is_empty() {
            p.empty { (t!("worksheets.empty", locale = locale)) }
        } @else {
            div.grid {
                @for w in &page.items {
                    (card(w, media))
                }
            }
        }
        (pager(page, &[("q", query)], locale))
    }
}

pub fn detail(lang: Lang, w: &Worksheet, media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        article.worksheet {
            h1 { (w.title) }
            (thumbnail(media.relative(w.image.as_deref()).as_deref(), &w.title))
            p { (w.description) }
            @if let Some(href) = media.relative(Some(&w.file)) {
                a.button href=(href) download { (t!("worksheets.download", locale = locale)) }
            }
        }
    }
}

pub fn show_all(
    lang: Lang,
    worksheets: &[Worksheet],
    query: &str,
    age_group: Option<&str>,
    media: &MediaUrls,
) -> Markup {
    let locale = lang.code();
    html! {
        h1 { (t!("worksheets.heading", locale = locale)) }
        form.filters method="get" {
            input type="search" name="q" value=(query);
            (age_select(age_group, locale))
            button type="submit" { (t!("search.button", locale = locale)) }
        }
        p.count { (t!("worksheets.count", locale = locale, count = worksheets.len())) }
        div.grid {
            @for w in worksheets {
                (card(w, media))
            }
        }
    }
}
