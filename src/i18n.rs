// src/i18n.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{CookieJar, cookie::Cookie};

/// Cookie remembering the visitor's language between requests.
pub const LANG_COOKIE: &str = "lang";

/// Languages the site is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Sr,
    De,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::Sr, Lang::De];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Sr => "sr",
            Lang::De => "de",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == value)
    }

    /// Name of the language in itself, for the switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Sr => "Srpski",
            Lang::De => "Deutsch",
        }
    }

    /// Picks the translation for this language, falling back to English
    /// when it is missing or blank.
    pub fn pick<'a>(&self, en: &'a str, sr: Option<&'a str>, de: Option<&'a str>) -> &'a str {
        let localized = match self {
            Lang::En => None,
            Lang::Sr => sr,
            Lang::De => de,
        };
        localized.filter(|s| !s.trim().is_empty()).unwrap_or(en)
    }

    /// Resolves the active language: the `lang` query value, else the
    /// remembered cookie value, else English. Unknown codes mean English.
    pub fn negotiate(query: Option<&str>, remembered: Option<&str>) -> Self {
        query
            .filter(|v| !v.is_empty())
            .or(remembered.filter(|v| !v.is_empty()))
            .and_then(Lang::parse)
            .unwrap_or_default()
    }
}

/// The language of the current request.
///
/// Extracted per request and handed to every view explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLang(pub Lang);

impl<S: Send + Sync> FromRequestParts<S> for ActiveLang {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "lang")
                .map(|(_, v)| v.into_owned())
        });
        let jar = CookieJar::from_headers(&parts.headers);
        let remembered = jar.get(LANG_COOKIE).map(|c| c.value().to_string());

        Ok(ActiveLang(Lang::negotiate(query.as_deref(), remembered.as_deref())))
    }
}

/// Stores the resolved language so later requests without `?lang=` keep it.
pub fn remember(jar: CookieJar, lang: Lang) -> CookieJar {
    jar.add(Cookie::build((LANG_COOKIE, lang.code())).path("/").build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_wins_over_cookie() {
        assert_eq!(Lang::negotiate(Some("de"), Some("sr")), Lang::De);
    }

    #[test]
    fn cookie_used_without_query() {
        assert_eq!(Lang::negotiate(None, Some("sr")), Lang::Sr);
        assert_eq!(Lang::negotiate(Some(""), Some("sr")), Lang::Sr);
    }

    #[test]
    fn unsupported_language_means_english() {
        assert_eq!(Lang::negotiate(Some("fr"), Some("de")), Lang::En);
        assert_eq!(Lang::negotiate(None, None), Lang::En);
    }

    #[test]
    fn pick_falls_back_to_english() {
        assert_eq!(Lang::De.pick("Colors", Some("Boje"), Some("Farben")), "Farben");
        assert_eq!(Lang::De.pick("Colors", Some("Boje"), Some(" ")), "Colors");
        assert_eq!(Lang::Sr.pick("Colors", None, Some("Farben")), "Colors");
    }
}
