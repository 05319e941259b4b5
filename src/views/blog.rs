// src/views/blog.rs

use maud::{Markup, PreEscaped, html};
use rust_i18n::t;

use super::components::thumbnail;
use crate::{i18n::Lang, models::blog::BlogPost, utils::{html::clean_html, media::MediaUrls}};

pub fn card(post: &BlogPost, lang: Lang, media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        article.post-card {
            (thumbnail(media.relative(post.image.as_deref()).as_deref(), post.title_in(lang)))
            h3 { (post.title_in(lang)) }
            time datetime=(post.published_at.to_rfc3339()) { (post.published_at.format("%d.%m.%Y").to_string()) }
            p { (post.summary_in(lang)) }
            a href=(format!("/blog/{}/", post.slug)) { (t!("blog.read_more", locale = locale)) }
        }
    }
}

pub fn list(lang: Lang, posts: &[BlogPost], media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        h1 { (t!("blog.heading", locale = locale)) }
        @if posts.is_empty() {
            p.empty { (t!("blog.empty", locale = locale)) }
        }
        div.grid {
            @for post in posts {
                (card(post, lang, media))
            }
        }
    }
}

pub fn detail(lang: Lang, post: &BlogPost, media: &MediaUrls) -> Markup {
    html! {
        article.post {
            h1 { (post.title_in(lang)) }
            time datetime=(post.published_at.to_rfc3339()) { (post.published_at.format("%d.%m.%Y").to_string()) }
            (thumbnail(media.relative(post.image.as_deref()).as_deref(), post.title_in(lang)))
            div.content { (PreEscaped(clean_html(post.content_in(lang)))) }
        }
    }
}
