// src/views/layout.rs

use maud::{DOCTYPE, Markup, html};
use rust_i18n::t;

use crate::{flash::Flash, i18n::Lang};

/// Per-request chrome shared by every page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub lang: Lang,
    pub flash: Option<Flash>,
    /// Request path and raw query, used by the language switcher.
    pub path: String,
    pub query: Option<String>,
    /// Search result pages hide the language switcher.
    pub lang_switcher: bool,
}

/// Link to the current page in `lang`: the existing query is kept and only
/// `lang` is replaced.
pub fn switch_lang_href(path: &str, query: Option<&str>, lang: Lang) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key != "lang" {
                serializer.append_pair(&key, &value);
            }
        }
    }
    serializer.append_pair("lang", lang.code());
    format!("{}?{}", path, serializer.finish())
}

fn header(meta: &PageMeta) -> Markup {
    let locale = meta.lang.code();
    html! {
        header.site-header {
            nav {
                a.brand href="/" { strong { (t!("site.name", locale = locale)) } }
                ul {
                    li { a href="/" { (t!("nav.home", locale = locale)) } }
                    li { a href="/lessons/" { (t!("nav.lessons", locale = locale)) } }
                    li { a href="/resources/" { (t!("nav.worksheets", locale = locale)) } }
                    li { a href="/blog/" { (t!("nav.blog", locale = locale)) } }
                    li { a href="/about/" { (t!("nav.about", locale = locale)) } }
                    li { a href="/contact/" { (t!("nav.contact", locale = locale)) } }
                }
                @if meta.lang_switcher {
                    ul.lang-switcher {
                        @for lang in Lang::ALL {
                            li {
                                a href=(switch_lang_href(&meta.path, meta.query.as_deref(), lang))
                                  aria-current=[(lang == meta.lang).then_some("true")] {
                                    (lang.native_name())
                                }
                            }
                        }
                    }
                }
            }
            form.search action="/lessons/search/" method="get" {
                input type="search" name="q" placeholder=(t!("search.placeholder", locale = locale));
                button type="submit" { (t!("search.button", locale = locale)) }
            }
        }
    }
}

fn footer(locale: &str) -> Markup {
    html! {
        footer.site-footer {
            section.newsletter {
                h3 { (t!("subscribe.heading", locale = locale)) }
                form action="/subscribe/" method="post" {
                    input type="email" name="email" placeholder=(t!("subscribe.email", locale = locale));
                    button type="submit" { (t!("subscribe.button", locale = locale)) }
                }
            }
            p { (t!("site.tagline", locale = locale)) }
        }
    }
}

fn flash_banner(flash: Flash, lang: Lang) -> Markup {
    html! {
        div class=(format!("flash flash-{}", flash.level())) role="alert" {
            (flash.text(lang))
        }
    }
}

pub fn page(meta: &PageMeta, title: &str, body: Markup) -> Markup {
    let locale = meta.lang.code();
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                link rel="stylesheet" href="/static/css/site.css";
                title { (title) " - " (t!("site.name", locale = locale)) }
            }
            body {
                (header(meta))
                @if let Some(flash) = meta.flash {
                    (flash_banner(flash, meta.lang))
                }
                main { (body) }
                (footer(locale))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switcher_keeps_filters_and_replaces_lang() {
        assert_eq!(
            switch_lang_href("/lessons/", Some("q=farben&category=2&page=2&lang=de"), Lang::Sr),
            "/lessons/?q=farben&category=2&page=2&lang=sr"
        );
        assert_eq!(switch_lang_href("/about/", None, Lang::En), "/about/?lang=en");
    }
}
