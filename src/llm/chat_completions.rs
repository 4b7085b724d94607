//! OpenAI Chat Completions API driver.
//!
//! This module implements the [`LlmDriver`] trait for the Chat Completions
//! API (`/v1/chat/completions`). Requests are non-streaming; structured
//! output is requested through `response_format` with a strict JSON schema.

use anyhow::{Context, anyhow, bail};
use serde_json::json;

use super::{LlmDriver, LlmRequest, LlmSettings};

/// Driver for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct ChatCompletionsDriver {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsDriver")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ChatCompletionsDriver {
    /// Create a new Chat Completions driver with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self::with_client(settings, reqwest::Client::new())
    }

    /// Create a driver that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(settings: LlmSettings, http: reqwest::Client) -> Self {
        Self { http, settings }
    }

    /// Build the JSON request body.
    fn request_body(&self, req: &LlmRequest) -> serde_json::Value {
        let mut body = json!({
            "model": self.settings.model,
            "messages": req.messages,
        });

        if let Some(format) = &req.response_format {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": format.name,
                    "strict": true,
                    "schema": format.schema,
                }
            });
        }

        body
    }
}

#[async_trait::async_trait]
impl LlmDriver for ChatCompletionsDriver {
    async fn complete(&self, req: LlmRequest) -> anyhow::Result<String> {
        let url = self.settings.provider.chat_url(&self.settings.base_url);
        let body = self.request_body(&req);

        tracing::debug!(
            url = %url,
            model = %self.settings.model,
            message_count = req.messages.len(),
            schema = req.response_format.as_ref().map(|f| f.name),
            "Sending chat completion"
        );

        let mut rb = self.http.post(&url).json(&body);
        if let Some(key) = &self.settings.api_key {
            rb = self.settings.provider.authorize(rb, key);
        }

        let resp = rb.send().await.context("LLM request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            bail!("LLM returned status {status}: {detail}");
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .context("LLM response is not valid JSON")?;
        let message = &v["choices"][0]["message"];

        if let Some(refusal) = message.get("refusal").and_then(serde_json::Value::as_str) {
            bail!("Model refused the request: {refusal}");
        }

        let content = message
            .get("content")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| anyhow!("LLM response has no message content"))?;

        if let Some(usage) = v.get("usage") {
            tracing::debug!(
                prompt_tokens = usage["prompt_tokens"].as_u64(),
                completion_tokens = usage["completion_tokens"].as_u64(),
                "Chat completion finished"
            );
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Message, Provider, ResponseFormat};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> LlmSettings {
        LlmSettings {
            base_url: base_url.to_string(),
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o".to_string(),
            provider: Provider::Generic,
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content, "refusal": null },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
        })
    }

    #[tokio::test]
    async fn test_complete_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-4o" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hello there")))
            .expect(1)
            .mount(&server)
            .await;

        let driver = ChatCompletionsDriver::new(settings(&server.uri()));
        let text = driver
            .complete(LlmRequest::new(vec![Message::user("Hi")]))
            .await
            .unwrap();

        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn test_sends_strict_json_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": { "name": "greeting", "strict": true }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"text":"hi"}"#)))
            .expect(1)
            .mount(&server)
            .await;

        let driver = ChatCompletionsDriver::new(settings(&server.uri()));
        let req = LlmRequest::new(vec![Message::user("Hi")]).with_response_format(ResponseFormat {
            name: "greeting",
            schema: json!({ "type": "object" }),
        });

        let text = driver.complete(req).await.unwrap();
        assert_eq!(text, r#"{"text":"hi"}"#);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let driver = ChatCompletionsDriver::new(settings(&server.uri()));
        let err = driver
            .complete(LlmRequest::new(vec![Message::user("Hi")]))
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("429"), "unexpected error: {msg}");
        assert!(msg.contains("rate limited"), "unexpected error: {msg}");
    }

    #[tokio::test]
    async fn test_refusal_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": { "role": "assistant", "content": null, "refusal": "I can't help with that." }
                }]
            })))
            .mount(&server)
            .await;

        let driver = ChatCompletionsDriver::new(settings(&server.uri()));
        let err = driver
            .complete(LlmRequest::new(vec![Message::user("Hi")]))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn test_azure_uses_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/recruiter/chat/completions"))
            .and(header("api-key", "sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let mut settings = settings(&server.uri());
        settings.provider = Provider::AzureOpenAI {
            deployment_name: "recruiter".to_string(),
            api_version: "2024-08-01-preview".to_string(),
        };

        let driver = ChatCompletionsDriver::new(settings);
        let text = driver
            .complete(LlmRequest::new(vec![Message::user("Hi")]))
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }
}
