//! Rich-text sanitization for admin-authored blog content.
//!
//! Submitted HTML is reduced to an explicit allow-list before it ever reaches
//! the database, so stored content is safe to render verbatim. The allow-list
//! mirrors what the editor can produce: basic text markup, headings h2-h4,
//! lists, quotes, links.

use ammonia::Builder;
use once_cell::sync::Lazy;

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "b", "i", "u", "h2", "h3", "h4", "ul", "ol", "li", "blockquote",
    "a", "hr", "span",
];

const ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel", "class"];

static CLEANER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(["script", "style"].into_iter().collect())
        .generic_attributes(ALLOWED_ATTRIBUTES.iter().copied().collect())
        // the generic allow-list is exhaustive; no per-tag extras
        .tag_attributes(std::collections::HashMap::new())
        // rel is caller-controlled and already in the allow-list
        .link_rel(None);
    builder
});

/// Strips every tag and attribute outside the allow-list. Idempotent: feeding
/// the output back in returns it unchanged.
pub fn sanitize_html(input: &str) -> String {
    CLEANER.clean(input).to_string()
}

/// True when nothing renderable is left once tags are stripped.
pub fn is_effectively_empty(sanitized: &str) -> bool {
    sanitized.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_markup_passes_through() {
        let input = "<p>Hello <strong>world</strong></p><h2>Title</h2><ul><li>item</li></ul>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn script_and_iframe_are_stripped() {
        let cleaned = sanitize_html("<p>ok</p><script>alert(1)</script><iframe src='x'></iframe>");
        assert_eq!(cleaned, "<p>ok</p>");
    }

    #[test]
    fn event_handler_attributes_are_dropped() {
        let cleaned = sanitize_html(r#"<a href="https://x.dev" onclick="steal()">link</a>"#);
        assert_eq!(cleaned, r#"<a href="https://x.dev">link</a>"#);
    }

    #[test]
    fn allowed_link_attributes_survive() {
        let input = r#"<a href="https://x.dev" target="_blank" rel="noopener">go</a>"#;
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn sanitization_is_idempotent() {
        let messy = r#"<div><p class="lead">text</p><script>x</script><em>fine</em></div>"#;
        let once = sanitize_html(messy);
        let twice = sanitize_html(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn script_only_input_is_effectively_empty() {
        let cleaned = sanitize_html("<script>alert('x')</script>");
        assert!(is_effectively_empty(&cleaned));
    }

    #[test]
    fn whitespace_only_markup_is_effectively_empty() {
        let cleaned = sanitize_html("<div>   \n\t  </div>");
        assert!(is_effectively_empty(&cleaned));
    }

    #[test]
    fn plain_text_is_not_empty() {
        assert!(!is_effectively_empty(&sanitize_html("just words")));
    }
}
