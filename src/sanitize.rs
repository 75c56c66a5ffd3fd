//! Output-time neutralisation of markup in text fields.
//!
//! Stored values are never touched; handlers run bookmarks through a
//! [`Sanitizer`] only when rendering them into a response body.

/// Turns arbitrary text into something safe to embed in an HTML page.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

/// Escapes the five HTML-significant characters to entities.
///
/// Tags survive as visible text (`&lt;script&gt;`) rather than markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupEscaper;

impl Sanitizer for MarkupEscaper {
    fn sanitize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                other => out.push(other),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_neutralised() {
        let out = MarkupEscaper.sanitize("<script>alert(1)</script>");
        assert_eq!(out, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!out.contains('<'));
    }

    #[test]
    fn attributes_cannot_break_out() {
        let out = MarkupEscaper.sanitize(r#"<img src="x" onerror='alert(1)'>"#);
        assert!(!out.contains('<'));
        assert!(!out.contains('"'));
        assert!(!out.contains('\''));
    }

    #[test]
    fn plain_text_is_unchanged() {
        let text = "How-to guides: search, filter (v2.0)";
        assert_eq!(MarkupEscaper.sanitize(text), text);
    }

    #[test]
    fn ampersand_is_escaped_first() {
        assert_eq!(MarkupEscaper.sanitize("a&lt;b"), "a&amp;lt;b");
    }
}
