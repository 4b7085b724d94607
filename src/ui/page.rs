//! Document and fragment renderers.

use leptos::prelude::*;

use crate::messages::MessageRecord;
use crate::ui::chat::{ChatShell, MessageItems, ResponsePanelBody};
use crate::ui::components::{Icon, IconKind};

/// htmx build loaded by the page.
pub const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";

/// Render the full chat page.
#[must_use]
pub fn render_page() -> String {
    let body = view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content="Recruiting assistant chat" />
                <title>"Helix"</title>
                <link rel="stylesheet" href="/static/app.css" />
                <script src=HTMX_SRC></script>
                <script defer src="/static/chat.js"></script>
            </head>
            <body>
                <header class="app-header">
                    <Icon kind=IconKind::Sparkles class="brand-mark" />
                    <span class="brand-name">"Helix"</span>
                </header>
                <ChatShell />
            </body>
        </html>
    };

    format!("<!DOCTYPE html>{}", body.to_html())
}

/// Render message bubbles plus an out-of-band response panel.
///
/// The bubbles go wherever the requesting element targets (the whole list on
/// load, the end of the list after a submit). The panel always replaces the
/// contents of `#response-panel`.
#[must_use]
pub fn render_fragment(messages: Vec<MessageRecord>, latest: Option<MessageRecord>) -> String {
    view! {
        <MessageItems messages=messages />
        <div id="response-panel" class="response-panel" hx-swap-oob="innerHTML">
            <ResponsePanelBody latest=latest />
        </div>
    }
    .to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_shell() {
        let html = render_page();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="message-list""#));
        assert!(html.contains(r#"id="response-panel""#));
        assert!(html.contains(r#"id="chat-form""#));
        assert!(html.contains(r#"id="loading-indicator""#));
        assert!(html.contains("/static/chat.js"));
        assert!(html.contains(HTMX_SRC));
    }

    #[test]
    fn test_page_wires_htmx_requests() {
        let html = render_page();
        assert!(html.contains(r#"hx-get="/ui/messages""#));
        assert!(html.contains(r#"hx-trigger="load""#));
        assert!(html.contains(r#"hx-post="/ui/messages""#));
        assert!(html.contains(r#"hx-swap="beforeend""#));
        assert!(html.contains(r##"hx-indicator="#loading-indicator""##));
        assert!(html.contains(r#"hx-disabled-elt="find button""#));
    }

    #[test]
    fn test_submit_waits_for_initial_load() {
        let html = render_page();
        assert!(html.contains(r##"hx-sync="#message-list:queue""##));
    }

    #[test]
    fn test_fragment_swaps_panel_out_of_band() {
        let html = render_fragment(Vec::new(), None);
        assert!(html.contains(r#"id="response-panel""#));
        assert!(html.contains(r#"hx-swap-oob="innerHTML""#));
    }

    #[test]
    fn test_user_and_system_bubbles_render_with_role_classes() {
        let messages = vec![
            MessageRecord::user("Hire a QA lead"),
            MessageRecord::system("Drafted outreach for the QA Lead role.", Some("# QA Lead".to_string())),
        ];
        let latest = messages.last().cloned();

        let html = render_fragment(messages, latest);

        assert!(html.contains(r#"class="bubble bubble-user""#));
        assert!(html.contains(r#"class="bubble bubble-system""#));
        assert!(html.contains("Hire a QA lead"));
        assert!(html.contains("<h1>QA Lead</h1>"));
    }

    #[test]
    fn test_latest_payload_is_editable() {
        let record = MessageRecord::system("ok", Some("**bold** draft".to_string()));
        let html = render_fragment(vec![record.clone()], Some(record));

        assert!(html.contains(r#"class="markdown-source""#));
        assert!(html.contains("**bold** draft"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_empty_conversation_shows_hints() {
        let html = render_fragment(Vec::new(), None);
        assert!(html.contains("No messages yet"));
        assert!(html.contains("Drafted candidate outreach will appear here."));
        assert!(!html.contains("bubble-user"));
    }

    #[test]
    fn test_script_in_payload_does_not_survive() {
        let record = MessageRecord::system("x", Some("<script>alert(1)</script>\n\nok".to_string()));
        let html = render_fragment(vec![record.clone()], Some(record));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_payload_cannot_close_source_textarea() {
        let payload = "</textarea><img src=x onerror=alert(1)>";
        let record = MessageRecord::system("x", Some(payload.to_string()));
        let html = render_fragment(Vec::new(), Some(record));

        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;/textarea&gt;&lt;img src=x onerror=alert(1)&gt;"));
        assert_eq!(html.matches("</textarea>").count(), 1);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_fragment(vec![MessageRecord::user("<b>hi</b>")], None);
        assert!(html.contains("&lt;b&gt;hi"));
        assert!(!html.contains("<b>hi</b>"));
    }
}
