//! HTTP client for the messages API.
//!
//! # Example
//!
//! ```rust,no_run
//! use helix::client::MessagesClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MessagesClient::new("http://localhost:8000")?;
//!
//! let turn = client.send_message("We are hiring a senior Rust engineer").await?;
//! let history = client.list_messages().await?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;
use url::Url;

use crate::messages::MessageRecord;

/// Client error type.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Server returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },
}

/// Typed client for `GET /messages` and `POST /messages`.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    base_url: Url,
    http: reqwest::Client,
}

impl MessagesClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the whole conversation in order.
    pub async fn list_messages(&self) -> Result<Vec<MessageRecord>, ClientError> {
        let response = self.http.get(self.url("/messages")?).send().await?;
        Self::handle_response(response).await
    }

    /// Submit one message. Returns the records the server appended.
    pub async fn send_message(
        &self,
        text: impl Into<String>,
    ) -> Result<Vec<MessageRecord>, ClientError> {
        let response = self
            .http
            .post(self.url("/messages")?)
            .json(&text.into())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            tracing::warn!(status = status.as_u16(), "Messages API returned an error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            MessagesClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_joins_paths_onto_base() {
        let client = MessagesClient::new("http://localhost:8000/").unwrap();
        assert_eq!(
            client.url("/messages").unwrap().as_str(),
            "http://localhost:8000/messages"
        );
    }
}
