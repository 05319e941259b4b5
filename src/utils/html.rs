use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe tags (<b>, <p>, <a>, ...) are kept, scripts,
/// iframes and event-handler attributes are stripped. Blog bodies are
/// authored as HTML in the admin and pass through here before rendering.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_removed() {
        let cleaned = clean_html("<p>Hi</p><script>alert(1)</script>");
        assert_eq!(cleaned, "<p>Hi</p>");
    }

    #[test]
    fn event_handlers_are_removed() {
        let cleaned = clean_html(r#"<b onclick="x()">bold</b>"#);
        assert_eq!(cleaned, "<b>bold</b>");
    }
}
