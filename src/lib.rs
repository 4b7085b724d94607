//! Helix: a recruiting assistant chat.
//!
//! A small axum service that keeps a conversation in memory, answers each
//! user message through a three-step LLM prompt chain, and serves a
//! server-rendered chat page whose markdown drafts are sanitized before they
//! reach the browser.
//!
//! # Architecture
//!
//! - **Server**: axum JSON API (`/messages`) plus HTML fragments (`/ui/*`)
//! - **Chain**: extraction, gate check, recruiter response, confirmation
//! - **UI**: Leptos SSR components and a small script for fetch/submit
//!
//! # Modules
//!
//! - [`messages`]: message records and the in-memory store
//! - [`markdown`]: markdown to sanitized HTML
//! - [`llm`]: Chat Completions driver and settings
//! - [`recruiter`]: the prompt chain
//! - [`conversation`]: the submit flow
//! - [`server`]: router and handlers
//! - [`client`]: HTTP client for the message API

// Leptos view types nest deeply.
#![recursion_limit = "256"]
// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unused_async)]
#![allow(clippy::needless_pass_by_value)]

pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod markdown;
pub mod messages;
pub mod recruiter;
pub mod server;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::conversation::Conversation;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The conversation and its chain.
    pub conversation: Conversation,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}
