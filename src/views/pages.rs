// src/views/pages.rs

use maud::{Markup, html};
use rust_i18n::t;

use super::blog;
use crate::{
    i18n::Lang,
    models::{blog::BlogPost, contact::ContactForm},
    utils::media::MediaUrls,
};

pub fn home(lang: Lang, posts: &[BlogPost], media: &MediaUrls) -> Markup {
    let locale = lang.code();
    html! {
        section.hero {
            h1 { (t!("site.name", locale = locale)) }
            p { (t!("site.tagline", locale = locale)) }
            a.button href="/lessons/lessons/4-5/" { "4–5" }
            a.button href="/lessons/lessons/6-7/" { "6–7" }
        }
        @if !posts.is_empty() {
            section.latest {
                h2 { (t!("blog.latest", locale = locale)) }
                div.grid {
                    @for post in posts {
                        (blog::card(post, lang, media))
                    }
                }
            }
        }
    }
}

pub fn about(lang: Lang) -> Markup {
    let locale = lang.code();
    html! {
        h1 { (t!("about.heading", locale = locale)) }
        p { (t!("about.body", locale = locale)) }
    }
}

/// Contact form, refilled with whatever was posted.
pub fn contact(lang: Lang, form: &ContactForm) -> Markup {
    let locale = lang.code();
    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    html! {
        h1 { (t!("contact.heading", locale = locale)) }
        form.contact action=(format!("/contact/?lang={}", locale)) method="post" {
            label {
                (t!("contact.name", locale = locale))
                input type="text" name="name" value=(value(&form.name));
            }
            label {
                (t!("contact.email", locale = locale))
                input type="email" name="email" value=(value(&form.email));
            }
            label {
                (t!("contact.message", locale = locale))
                textarea name="message" rows="6" { (value(&form.message)) }
            }
            button type="submit" { (t!("contact.send", locale = locale)) }
        }
    }
}
