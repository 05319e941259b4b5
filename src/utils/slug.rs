// src/utils/slug.rs

/// Maximum length of the base slug derived from a title.
pub const MAX_BASE_LEN: usize = 200;

/// Used when a title slugs down to nothing (e.g. only punctuation).
pub const FALLBACK_SLUG: &str = "post";

/// Lowercase ASCII slug of a title, transliterating non-ASCII letters.
pub fn base_slug(title: &str) -> String {
    let mut slug = slug::slugify(title);
    if slug.len() > MAX_BASE_LEN {
        slug.truncate(MAX_BASE_LEN);
        // Don't leave a dangling separator after the cut.
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// True when `value` only holds ASCII letters, digits, `-` and `_`, so it
/// fits in a single URL path segment.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Slugs to try in order: `base`, `base-2`, `base-3`, ...
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((2..).map(move |i| format!("{}-{}", base, i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_ascii() {
        assert_eq!(base_slug("Learning Colors With Kids!"), "learning-colors-with-kids");
        assert_eq!(base_slug("Čitanje i pisanje"), "citanje-i-pisanje");
    }

    #[test]
    fn empty_slug_falls_back() {
        assert_eq!(base_slug("!!!"), "post");
        assert_eq!(base_slug(""), "post");
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "word ".repeat(100);
        let slug = base_slug(&title);
        assert!(slug.len() <= MAX_BASE_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn only_path_safe_slugs_are_valid() {
        assert!(is_valid_slug("spring-news_2024"));
        assert!(!is_valid_slug("Hello World/part 2"));
        assert!(!is_valid_slug("čitanje"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn candidates_count_from_two() {
        let got: Vec<String> = candidates("hello").take(3).collect();
        assert_eq!(got, vec!["hello", "hello-2", "hello-3"]);
    }
}
