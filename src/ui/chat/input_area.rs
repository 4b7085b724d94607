//! Chat input form with loading indicator.

use leptos::prelude::*;

use crate::ui::components::{Icon, IconKind};

/// Message input form.
///
/// htmx posts the form to `/ui/messages` and appends the returned bubbles to
/// the message list. The request is queued behind the initial list load, the
/// indicator is shown and the button disabled while it is in flight.
#[component]
pub fn ChatInputArea() -> impl IntoView {
    view! {
        <div class="chat-input-area">
            <div id="loading-indicator" class="loading-indicator" role="status">
                <Icon kind=IconKind::Loader class="spin" />
                <span>"Thinking..."</span>
            </div>
            <form
                id="chat-form"
                class="chat-input"
                action="/ui/messages"
                method="post"
                hx-post="/ui/messages"
                hx-target="#message-list"
                hx-swap="beforeend"
                hx-sync="#message-list:queue"
                hx-indicator="#loading-indicator"
                hx-disabled-elt="find button"
            >
                <textarea
                    name="message"
                    class="chat-textarea"
                    placeholder="Describe the role you're hiring for..."
                    rows="2"
                    required
                ></textarea>
                <button type="submit" class="send-button" aria-label="Send message">
                    <Icon kind=IconKind::Send />
                </button>
            </form>
            <p class="input-hint">"Press Enter to send, Shift+Enter for new line"</p>
        </div>
    }
}
