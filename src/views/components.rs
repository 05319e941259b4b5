// src/views/components.rs

use maud::{Markup, html};
use rust_i18n::t;

use crate::{models::lesson::AGE_GROUPS, utils::pagination::Page};

/// Previous/next links keeping the other query parameters.
pub fn pager<T>(page: &Page<T>, params: &[(&str, &str)], locale: &str) -> Markup {
    let link = |number: usize| {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            query.append_pair(key, value);
        }
        query.append_pair("page", &number.to_string());
        format!("?{}", query.finish())
    };

    html! {
        @if page.num_pages > 1 {
            nav.pagination {
                @if page.has_previous() {
                    a rel="prev" href=(link(page.number - 1)) { (t!("pagination.previous", locale = locale)) }
                }
                span {
                    (t!("pagination.page", locale = locale, number = page.number, total = page.num_pages))
                }
                @if page.has_next() {
                    a rel="next" href=(link(page.number + 1)) { (t!("pagination.next", locale = locale)) }
                }
            }
        }
    }
}

/// Age group select; the empty value means every age.
pub fn age_select(selected: Option<&str>, locale: &str) -> Markup {
    html! {
        select name="age_group" {
            option value="" { (t!("search.all_ages", locale = locale)) }
            @for (code, label) in AGE_GROUPS {
                option value=(code) selected[selected == Some(code)] { (label) }
            }
        }
    }
}

pub fn thumbnail(src: Option<&str>, alt: &str) -> Markup {
    html! {
        @if let Some(src) = src {
            img.thumb src=(src) alt=(alt) loading="lazy";
        }
    }
}
