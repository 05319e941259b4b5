// src/flash.rs

use axum_extra::extract::{CookieJar, cookie::Cookie};
use rust_i18n::t;

use crate::i18n::Lang;

/// Cookie carrying a one-shot notice across a redirect.
pub const FLASH_COOKIE: &str = "flash";

/// One-shot notices shown after a form submission.
///
/// Only the key travels in the cookie; the text is rendered in whatever
/// language the next page is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    ContactSent,
    ContactMissingFields,
    Subscribed,
    AlreadySubscribed,
    SubscribeMissingEmail,
}

impl Flash {
    const ALL: [Flash; 5] = [
        Flash::ContactSent,
        Flash::ContactMissingFields,
        Flash::Subscribed,
        Flash::AlreadySubscribed,
        Flash::SubscribeMissingEmail,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Flash::ContactSent => "contact_sent",
            Flash::ContactMissingFields => "contact_missing_fields",
            Flash::Subscribed => "subscribed",
            Flash::AlreadySubscribed => "already_subscribed",
            Flash::SubscribeMissingEmail => "subscribe_missing_email",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// CSS level: "success", "info" or "error".
    pub fn level(&self) -> &'static str {
        match self {
            Flash::ContactSent | Flash::Subscribed => "success",
            Flash::AlreadySubscribed => "info",
            Flash::ContactMissingFields | Flash::SubscribeMissingEmail => "error",
        }
    }

    pub fn text(&self, lang: Lang) -> String {
        let locale = lang.code();
        let text = match self {
            Flash::ContactSent => t!("flash.contact_sent", locale = locale),
            Flash::ContactMissingFields => t!("flash.contact_missing_fields", locale = locale),
            Flash::Subscribed => t!("flash.subscribed", locale = locale),
            Flash::AlreadySubscribed => t!("flash.already_subscribed", locale = locale),
            Flash::SubscribeMissingEmail => t!("flash.subscribe_missing_email", locale = locale),
        };
        text.into_owned()
    }
}

/// Queues a notice for the next rendered page.
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(Cookie::build((FLASH_COOKIE, flash.key())).path("/").build())
}

/// Reads and clears the pending notice, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar.get(FLASH_COOKIE).and_then(|c| Flash::parse(c.value()));
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, flash);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_survives_the_cookie() {
        let jar = set(CookieJar::new(), Flash::AlreadySubscribed);
        let (_, flash) = take(jar);
        assert_eq!(flash, Some(Flash::AlreadySubscribed));
    }

    #[test]
    fn messages_are_translated() {
        assert_eq!(
            Flash::ContactMissingFields.text(Lang::De),
            "⚠️ Bitte fülle alle Felder aus."
        );
        assert_ne!(Flash::ContactSent.text(Lang::En), Flash::ContactSent.text(Lang::Sr));
    }
}
