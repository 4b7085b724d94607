//! Markdown to sanitized HTML.
//!
//! Payloads come straight from the model, so the rendered HTML must be safe
//! to inject into the page. Sanitizing happens on the pulldown-cmark event
//! stream before HTML is produced:
//!
//! - raw HTML (block or inline) is emitted as escaped text
//! - link targets with a scheme other than `http`, `https` or `mailto`
//!   are rewritten to `#`
//! - images with such a source are dropped and their alt text kept as text
//!
//! # Example
//!
//! ```rust
//! use helix::markdown::render_markdown;
//!
//! let html = render_markdown("**hi** <script>alert(1)</script>");
//! assert!(html.contains("<strong>hi</strong>"));
//! assert!(!html.contains("<script>"));
//! ```

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// URL schemes allowed in links and image sources.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render a markdown string to sanitized HTML.
///
/// Blank input renders to an empty string.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    if source.trim().is_empty() {
        return String::new();
    }

    let mut sanitizer = Sanitizer::default();
    let events = Parser::new_ext(source, options()).filter_map(|event| sanitizer.filter(event));

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Parser options for payload markdown.
fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Event-level sanitizer state.
#[derive(Debug, Default)]
struct Sanitizer {
    /// Depth of unsafe images currently being unwrapped.
    dropped_images: usize,
}

impl Sanitizer {
    fn filter<'a>(&mut self, event: Event<'a>) -> Option<Event<'a>> {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = if is_safe_url(&dest_url) {
                    dest_url
                } else {
                    tracing::debug!(url = %dest_url, "Neutralized unsafe link target");
                    CowStr::Borrowed("#")
                };
                Some(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }))
            }
            Event::Start(Tag::Image { ref dest_url, .. }) if !is_safe_url(dest_url) => {
                tracing::debug!(url = %dest_url, "Dropped image with unsafe source");
                self.dropped_images += 1;
                None
            }
            Event::End(TagEnd::Image) if self.dropped_images > 0 => {
                self.dropped_images -= 1;
                None
            }
            other => Some(other),
        }
    }
}

/// Whether a link or image target is safe to emit.
///
/// Relative paths and fragments have no scheme and are allowed. Whitespace
/// and control characters are ignored when reading the scheme, matching how
/// browsers parse `java\tscript:`.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];

    // A colon after a path, query or fragment delimiter is not a scheme.
    if scheme.contains(['/', '?', '#']) {
        return true;
    }

    let scheme = scheme.to_ascii_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_formatting() {
        let html = render_markdown("# Senior Engineer\n\n- Rust\n- **Tokio**\n");
        assert!(html.contains("<h1>Senior Engineer</h1>"));
        assert!(html.contains("<li>Rust</li>"));
        assert!(html.contains("<strong>Tokio</strong>"));
    }

    #[test]
    fn test_renders_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(render_markdown("  \n\t"), "");
    }

    #[test]
    fn test_block_html_is_escaped() {
        let html = render_markdown("<script>alert('x')</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_inline_html_is_escaped() {
        let html = render_markdown("hello <img src=x onerror=alert(1)> world");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_javascript_link_is_neutralized() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"<a href="#">click</a>"##));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_safe_links_are_kept() {
        let html = render_markdown("[site](https://example.com/jobs) [mail](mailto:hr@example.com) [rel](/jobs#open)");
        assert!(html.contains(r#"href="https://example.com/jobs""#));
        assert!(html.contains(r#"href="mailto:hr@example.com""#));
        assert!(html.contains(r#"href="/jobs#open""#));
    }

    #[test]
    fn test_unsafe_image_keeps_alt_text() {
        let html = render_markdown("![logo](data:image/svg+xml;base64,AAAA)");
        assert!(!html.contains("<img"));
        assert!(html.contains("logo"));
    }

    #[test]
    fn test_safe_image_is_kept() {
        let html = render_markdown("![logo](https://example.com/logo.png)");
        assert!(html.contains(r#"<img src="https://example.com/logo.png" alt="logo""#));
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("HTTP://EXAMPLE.COM"));
        assert!(is_safe_url("relative/path"));
        assert!(is_safe_url("#section"));
        assert!(is_safe_url("/path?q=a:b"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("JavaScript:alert(1)"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url("vbscript:msgbox"));
        assert!(!is_safe_url("data:text/html,hi"));
    }
}
