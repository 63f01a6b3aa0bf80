//! Markdown-to-HTML preview rendering via comrak.
//!
//! Rendering is a pure function of the buffer text; the autosave/preview
//! pipeline calls it off the render debouncer with whatever the buffer holds
//! at fire time.

use comrak::{markdown_to_html, Options};

/// Render markdown source to an HTML fragment for the preview pane.
pub fn render_html(source: &str) -> String {
    let mut options = Options::default();

    // Enable common extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    // Single newlines become <br>, matching how the preview treats
    // line breaks while typing
    options.render.hardbreaks = true;

    markdown_to_html(source, &options)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_heading() {
        let html = render_html("# Title");
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_renders_bold_and_italic() {
        let html = render_html("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_renders_list() {
        let html = render_html("* one\n* two");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_renders_link() {
        let html = render_html("[here](http://example.com)");
        assert!(html.contains(r#"<a href="http://example.com">here</a>"#));
    }

    #[test]
    fn test_hard_line_breaks() {
        let html = render_html("first\nsecond");
        assert!(html.contains("<br />"));
    }

    #[test]
    fn test_empty_source_produces_some_string() {
        // No failure modes: any input maps to some string
        let html = render_html("");
        assert!(html.is_empty() || html.trim().is_empty());
    }
}
