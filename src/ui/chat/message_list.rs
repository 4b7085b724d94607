//! Message list and chat bubbles.

use leptos::prelude::*;

use crate::messages::{MessageRecord, Role};
use crate::ui::components::{Icon, IconKind};

use super::SystemResponse;

/// The bubbles for a list of records, or an empty-state hint.
#[component]
pub fn MessageItems(
    /// Records in display order.
    messages: Vec<MessageRecord>,
) -> impl IntoView {
    if messages.is_empty() {
        return view! {
            <p class="empty-state">"No messages yet. Describe a role you are hiring for."</p>
        }
        .into_any();
    }

    messages
        .into_iter()
        .map(|record| view! { <MessageBubble record=record /> })
        .collect_view()
        .into_any()
}

/// One chat bubble. The class depends on the role.
#[component]
pub fn MessageBubble(
    /// Record to render.
    record: MessageRecord,
) -> impl IntoView {
    let role = record.role;
    let classes = format!("bubble bubble-{role}");
    let icon = match role {
        Role::User => IconKind::User,
        Role::System => IconKind::Bot,
    };
    let timestamp = record.created_at.to_rfc3339();
    let time_label = record.created_at.format("%H:%M").to_string();
    let payload = record.data.clone().filter(|_| record.has_markdown());
    let content = record.content.unwrap_or_default();

    view! {
        <article class=classes data-role=role.as_str() data-id=record.id.to_string()>
            <div class="bubble-avatar">
                <Icon kind=icon />
            </div>
            <div class="bubble-body">
                <p class="bubble-content">{content}</p>
                {payload.map(|data| view! {
                    <details class="bubble-payload">
                        <summary>"View draft"</summary>
                        <SystemResponse data=data />
                    </details>
                }
                .into_any())}
                <time class="bubble-time" datetime=timestamp>{time_label}</time>
            </div>
        </article>
    }
}
