//! HTTP server: router, middleware and handlers.
//!
//! `/messages` is the JSON API, `/ui/messages` serves the same operations as
//! HTML fragments for the chat page, and `/static` holds the page assets.
//! Every error response carries a JSON `{"error": ...}` body.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Request, State,
        rejection::{BytesRejection, FormRejection},
    },
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::conversation::Conversation;
use crate::error::AppError;
use crate::llm::{ChatCompletionsDriver, LlmDriver, LlmSettings};
use crate::messages::{MessageRecord, MessageStore};
use crate::recruiter::RecruiterChain;
use crate::ui;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>, settings: LlmSettings) -> anyhow::Result<()> {
    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        provider = ?settings.provider,
        "LLM configuration loaded"
    );

    let driver: Arc<dyn LlmDriver> = Arc::new(ChatCompletionsDriver::new(settings));
    let state = build_state(Arc::clone(&config), driver);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Assemble the shared state around an LLM driver.
#[must_use]
pub fn build_state(config: Arc<AppConfig>, driver: Arc<dyn LlmDriver>) -> AppState {
    let chain = RecruiterChain::new(driver, config.chain.confidence_threshold);
    let store = MessageStore::with_history_limit(config.conversation.history_limit);

    AppState {
        conversation: Conversation::new(store, chain),
        config,
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let timeout = Duration::from_secs(config.resilience.request_timeout_secs);

    Router::new()
        .route("/", get(index_handler))
        .route("/messages", get(api_list_messages).post(api_post_message))
        .route("/ui/messages", get(ui_list_messages).post(ui_post_message))
        .nest_service("/static", ServeDir::new(&config.server.static_dir))
        .layer(DefaultBodyLimit::max(config.resilience.body_limit_bytes))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => AppError::Timeout(timeout.as_secs()).into_response(),
                }
            },
        ))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins. `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Chat page.
async fn index_handler() -> Html<String> {
    Html(ui::render_page())
}

/// GET /ui/messages - Full list and panel fragment.
async fn ui_list_messages(State(state): State<AppState>) -> Html<String> {
    let conversation = &state.conversation;
    Html(ui::render_fragment(
        conversation.messages(),
        conversation.store().latest_with_markdown(),
    ))
}

/// Form body for the HTML submit route.
#[derive(Debug, Deserialize)]
struct MessageForm {
    message: String,
}

/// POST /ui/messages - Submit and return the new bubbles plus the panel.
async fn ui_post_message(
    State(state): State<AppState>,
    form: Result<Form<MessageForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|rejection| {
        AppError::from_form_rejection(&rejection, state.config.resilience.body_limit_bytes)
    })?;
    let turn = state.conversation.submit(&form.message).await?;
    let latest = state.conversation.store().latest_with_markdown();
    Ok(Html(ui::render_fragment(turn, latest)))
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Accepted JSON bodies for `POST /messages`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PostBody {
    /// A raw JSON string: `"text"`.
    Text(String),
    /// An object: `{"message": "text"}`.
    Object { message: String },
}

/// Extract the message text from a `POST /messages` body.
fn parse_post_body(body: &[u8]) -> Result<String, AppError> {
    let parsed: PostBody = serde_json::from_slice(body).map_err(|e| {
        AppError::InvalidBody(format!(
            "expected a JSON string or an object with a \"message\" field ({e})"
        ))
    })?;

    Ok(match parsed {
        PostBody::Text(text) | PostBody::Object { message: text } => text,
    })
}

/// GET /messages - All records in order.
async fn api_list_messages(State(state): State<AppState>) -> Json<Vec<MessageRecord>> {
    Json(state.conversation.messages())
}

/// POST /messages - Submit a message and return the records it produced.
async fn api_post_message(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<MessageRecord>>, AppError> {
    let body = body.map_err(|rejection| {
        AppError::from_bytes_rejection(&rejection, state.config.resilience.body_limit_bytes)
    })?;
    let text = parse_post_body(&body)?;
    tracing::info!(message_length = text.len(), "Received message");

    let turn = state.conversation.submit(&text).await?;
    Ok(Json(turn))
}
