//! Bordered page section with a heading.

use leptos::prelude::*;

/// Titled page section.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Panel title="Chat" class="chat-column">
///         <p>"Content"</p>
///     </Panel>
/// }
/// ```
#[component]
pub fn Panel(
    /// Heading text.
    title: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Section content.
    children: Children,
) -> impl IntoView {
    let classes = format!("panel {class}");

    view! {
        <section class=classes>
            <header class="panel-header">
                <h2 class="panel-title">{title}</h2>
            </header>
            <div class="panel-body">
                {children()}
            </div>
        </section>
    }
}
