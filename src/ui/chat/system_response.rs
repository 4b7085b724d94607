//! Markdown payload rendering.

use leptos::prelude::*;

use crate::markdown::render_markdown;
use crate::messages::MessageRecord;

/// Sanitized markdown payload, optionally with an editable source area.
#[component]
pub fn SystemResponse(
    /// Markdown source.
    #[prop(into)]
    data: String,
    /// Show the raw markdown in a textarea below the rendered view.
    #[prop(optional)]
    editable: bool,
) -> impl IntoView {
    let html = render_markdown(&data);
    // Raw source goes in as escaped text so `</textarea>` cannot close the element.
    let source = html_escape::encode_text(&data).into_owned();

    view! {
        <div class="system-response">
            <div class="markdown" inner_html=html></div>
            {editable.then(|| view! {
                <label class="markdown-source-label">
                    <span>"Edit draft"</span>
                    <textarea class="markdown-source" name="markdown" rows="10" spellcheck="true" inner_html=source></textarea>
                </label>
            })}
        </div>
    }
}

/// Contents of the response column: the latest payload, editable.
#[component]
pub fn ResponsePanelBody(
    /// Newest record carrying a payload.
    latest: Option<MessageRecord>,
) -> impl IntoView {
    match latest.and_then(|r| r.data) {
        Some(data) => view! { <SystemResponse data=data editable=true /> }.into_any(),
        None => view! {
            <p class="empty-state">"Drafted candidate outreach will appear here."</p>
        }
        .into_any(),
    }
}
