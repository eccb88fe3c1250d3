//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// File extensions treated as markdown (compared lowercase).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["markdown", "md"];

/// Whether an extension names a markdown file.
pub fn is_markdown(ext: &str) -> bool {
    MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Render markdown text to HTML.
pub fn to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, Parser::new_ext(content, options));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("md"));
        assert!(is_markdown("Markdown"));
        assert!(!is_markdown("html"));
    }

    #[test]
    fn test_to_html() {
        assert_eq!(to_html("This is a **test**."), "<p>This is a <strong>test</strong>.</p>\n");
        assert_eq!(to_html("This is a ~~dumb~~ test."), "<p>This is a <del>dumb</del> test.</p>\n");
    }

    #[test]
    fn test_template_syntax_is_plain_text() {
        assert_eq!(to_html("I am {{ page.title }}"), "<p>I am {{ page.title }}</p>\n");
    }
}
