//! Two-column chat layout.

use leptos::prelude::*;

use crate::ui::components::Panel;

use super::ChatInputArea;

/// Chat column on the left, response panel on the right.
///
/// The list loads itself from `/ui/messages` once the page is ready; the
/// response panel is filled by the out-of-band part of that fragment.
#[component]
pub fn ChatShell() -> impl IntoView {
    view! {
        <main class="chat-grid">
            <Panel title="Chat" class="chat-column">
                <div
                    id="message-list"
                    class="message-list"
                    hx-get="/ui/messages"
                    hx-trigger="load"
                    hx-swap="innerHTML"
                    aria-live="polite"
                    aria-label="Chat messages"
                ></div>
                <ChatInputArea />
            </Panel>
            <Panel title="Response" class="response-column">
                <div id="response-panel" class="response-panel"></div>
            </Panel>
        </main>
    }
}
