//! LLM settings, provider handling and the completion driver.
//!
//! The recruiter chain only needs one thing from a model: a single
//! non-streaming completion whose output follows a JSON schema. The
//! [`LlmDriver`] trait captures exactly that, and
//! [`ChatCompletionsDriver`] implements it for `OpenAI`-compatible
//! Chat Completions endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use helix::llm::{ChatCompletionsDriver, LlmDriver, LlmRequest, LlmSettings, Message, Provider};
//!
//! let settings = LlmSettings {
//!     base_url: "https://api.openai.com".to_string(),
//!     api_key: Some("sk-...".to_string()),
//!     model: "gpt-4o".to_string(),
//!     provider: Provider::OpenAI,
//! };
//! let driver = ChatCompletionsDriver::new(settings);
//! let reply = driver.complete(LlmRequest::new(vec![Message::user("Hello")])).await?;
//! ```

pub mod chat_completions;
pub mod provider;

pub use chat_completions::ChatCompletionsDriver;
pub use provider::Provider;

use serde::{Deserialize, Serialize};

/// LLM connection and model settings.
#[derive(Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `gpt-4o`).
    pub model: String,
    /// Provider type, detected from `base_url` unless set explicitly.
    pub provider: Provider,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("provider", &self.provider)
            .finish()
    }
}

/// Role of a prompt message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions for the model.
    System,
    /// Input from the user.
    User,
    /// Previous model output.
    Assistant,
}

/// A prompt message sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Text content.
    pub content: String,
}

impl Message {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// JSON schema the model output must follow.
#[derive(Debug, Clone)]
pub struct ResponseFormat {
    /// Schema name reported to the provider.
    pub name: &'static str,
    /// JSON schema for the output object.
    pub schema: serde_json::Value,
}

/// Request to an LLM driver.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Structured output format, if any.
    pub response_format: Option<ResponseFormat>,
}

impl LlmRequest {
    /// Plain text request.
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            response_format: None,
        }
    }

    /// Request output matching the given schema.
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Trait for LLM completion drivers.
#[async_trait::async_trait]
pub trait LlmDriver: Send + Sync {
    /// Run a single completion and return the assistant message text.
    ///
    /// With a response format set, the returned text is the JSON document
    /// produced by the model.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider answers with a
    /// non-success status, or the model refuses.
    async fn complete(&self, req: LlmRequest) -> anyhow::Result<String>;
}
