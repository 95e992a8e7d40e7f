//! Messages API Provider Implementation
//!
//! Sends an `ExtractionPrompt` to a hosted Messages-style endpoint
//! (`POST {endpoint}/v1/messages`) and returns the first text block of the
//! reply.
//!
//! # Examples
//!
//! ```no_run
//! use leasehold_llm::MessagesProvider;
//! use std::time::Duration;
//!
//! let provider = MessagesProvider::new(
//!     "https://api.anthropic.com",
//!     "claude-3-sonnet-20240229",
//!     std::env::var("ANTHROPIC_API_KEY").unwrap(),
//!     Duration::from_secs(300),
//! ).unwrap();
//! ```

use crate::{block_on, status_error, LlmError};
use leasehold_domain::traits::LlmProvider as LlmProviderTrait;
use leasehold_domain::ExtractionPrompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Messages API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version header sent with every request
pub const API_VERSION: &str = "2023-06-01";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Default timeout for connecting and for the whole request (5 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Provider for hosted Messages-style inference APIs
pub struct MessagesProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.anthropic.com")
    /// - `model`: Model identifier
    /// - `api_key`: Credential sent in the `x-api-key` header
    /// - `timeout`: Connect and request timeout
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider for the default endpoint and timeout
    pub fn default_endpoint(
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::new(
            DEFAULT_ENDPOINT,
            model,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a ExtractionPrompt) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            system: &prompt.system,
            max_tokens: prompt.max_tokens,
            temperature: prompt.temperature,
            messages: prompt
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    /// Send the prompt and return the generated text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The credentials are rejected
    /// - The model is not available
    /// - The response body has no text content
    pub async fn generate(&self, prompt: &ExtractionPrompt) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.endpoint);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, body, &self.model));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_text(body)
    }
}

fn first_text(body: MessagesResponse) -> Result<String, LlmError> {
    body.content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no text content".to_string()))
}

impl LlmProviderTrait for MessagesProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &ExtractionPrompt) -> Result<String, Self::Error> {
        block_on(MessagesProvider::generate(self, prompt))?
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leasehold_domain::ChatMessage;

    fn prompt() -> ExtractionPrompt {
        ExtractionPrompt {
            system: "You are a Data Processor.".to_string(),
            max_tokens: 10000,
            temperature: 0.5,
            messages: vec![ChatMessage::user("<rental_agreement> text </rental_agreement>")],
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = MessagesProvider::new(
            "https://example.test/",
            "claude-test",
            "secret",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.endpoint, "https://example.test");
        assert_eq!(provider.model_name(), "claude-test");
    }

    #[test]
    fn test_default_endpoint() {
        let provider = MessagesProvider::default_endpoint(DEFAULT_MODEL, "secret").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_shape() {
        let provider = MessagesProvider::default_endpoint("claude-test", "secret").unwrap();
        let prompt = prompt();
        let body = serde_json::to_value(provider.request_body(&prompt)).unwrap();

        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["system"], "You are a Data Processor.");
        assert_eq!(body["max_tokens"], 10000);
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(
            body["messages"][0]["content"],
            "<rental_agreement> text </rental_agreement>"
        );
    }

    #[test]
    fn test_first_text_block_is_returned() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "<output>{}</output>"}, {"type": "text", "text": "ignored"}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(body).unwrap(), "<output>{}</output>");
    }

    #[test]
    fn test_response_without_text() {
        let body: MessagesResponse =
            serde_json::from_str(r#"{"content": [{"type": "tool_use", "id": "x"}]}"#).unwrap();
        assert!(matches!(first_text(body), Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = MessagesProvider::new(
            "http://localhost:99999",
            "claude-test",
            "secret",
            Duration::from_secs(1),
        )
        .unwrap();

        let result = provider.generate(&prompt()).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
