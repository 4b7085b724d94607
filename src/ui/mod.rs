//! Server-rendered chat UI.
//!
//! Leptos components are rendered to strings on the server. The page shell
//! is static; the message list and response panel arrive as fragments from
//! `/ui/messages` and are swapped in by htmx.
//!
//! # Structure
//!
//! - [`page`]: full document and fragment renderers
//! - [`chat`]: message list, markdown panel and input area
//! - [`components`]: small shared building blocks

pub mod chat;
pub mod components;
pub mod page;

pub use page::{render_fragment, render_page};
