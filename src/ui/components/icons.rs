//! Inline SVG icons.

use leptos::prelude::*;

/// Available icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Paper plane, used on the submit button.
    Send,
    /// Spinner shown while a reply is pending.
    Loader,
    /// Avatar for user turns.
    User,
    /// Avatar for system turns.
    Bot,
    /// Brand mark.
    Sparkles,
}

/// Inline SVG icon.
#[component]
pub fn Icon(
    /// Which icon to draw.
    kind: IconKind,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let classes = format!("icon icon-{} {class}", kind_name(kind));

    match kind {
        IconKind::Send => view! {
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class=classes aria-hidden="true">
                <line x1="22" y1="2" x2="11" y2="13" />
                <polygon points="22 2 15 22 11 13 2 9 22 2" />
            </svg>
        }
        .into_any(),
        IconKind::Loader => view! {
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class=classes aria-hidden="true">
                <path d="M21 12a9 9 0 1 1-6.219-8.56" />
            </svg>
        }
        .into_any(),
        IconKind::User => view! {
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class=classes aria-hidden="true">
                <path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2" />
                <circle cx="12" cy="7" r="4" />
            </svg>
        }
        .into_any(),
        IconKind::Bot => view! {
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class=classes aria-hidden="true">
                <rect x="3" y="11" width="18" height="10" rx="2" />
                <circle cx="12" cy="5" r="2" />
                <path d="M12 7v4" />
            </svg>
        }
        .into_any(),
        IconKind::Sparkles => view! {
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class=classes aria-hidden="true">
                <path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z" />
            </svg>
        }
        .into_any(),
    }
}

fn kind_name(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Send => "send",
        IconKind::Loader => "loader",
        IconKind::User => "user",
        IconKind::Bot => "bot",
        IconKind::Sparkles => "sparkles",
    }
}
