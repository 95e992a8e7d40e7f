//! Leasehold LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from
//! `leasehold-domain`. Every provider takes a structured `ExtractionPrompt`
//! and returns the model's raw generated text.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `MessagesProvider`: Hosted Messages-style HTTP API
//! - `OllamaProvider`: Local Ollama chat API
//!
//! Providers make exactly one request per call. Failures are returned to the
//! caller as-is; there is no retry or backoff.
//!
//! # Examples
//!
//! ```
//! use leasehold_llm::MockProvider;
//! use leasehold_domain::traits::LlmProvider;
//! use leasehold_domain::{ChatMessage, ExtractionPrompt};
//!
//! let provider = MockProvider::new("<output>{}</output>");
//! let prompt = ExtractionPrompt {
//!     system: "Extract terms".to_string(),
//!     max_tokens: 100,
//!     temperature: 0.5,
//!     messages: vec![ChatMessage::user("lease text")],
//! };
//! assert_eq!(provider.generate(&prompt).unwrap(), "<output>{}</output>");
//! ```

#![warn(missing_docs)]

pub mod messages;
pub mod ollama;

use leasehold_domain::traits::LlmProvider as LlmProviderTrait;
use leasehold_domain::ExtractionPrompt;
use std::future::Future;
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

pub use messages::MessagesProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Map a non-success HTTP status to an error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String, model: &str) -> LlmError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

static FALLBACK_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Drive an async request to completion from synchronous code
///
/// Uses the ambient tokio runtime when one is available (the caller must then
/// be on a blocking-pool thread, e.g. inside `spawn_blocking`). Otherwise the
/// process-wide fallback runtime is used.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Ok(handle.block_on(future)),
        Err(_) => Ok(fallback_runtime()?.block_on(future)),
    }
}

/// Runtime shared by every call made outside tokio
///
/// A provider's `reqwest::Client` pools connections on the runtime that
/// opened them, so the runtime must outlive any single request.
fn fallback_runtime() -> Result<&'static tokio::runtime::Runtime, LlmError> {
    if let Some(runtime) = FALLBACK_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("leasehold-llm")
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    // A racing thread may have installed its runtime first; ours is dropped.
    let _ = FALLBACK_RUNTIME.set(runtime);
    FALLBACK_RUNTIME
        .get()
        .ok_or_else(|| LlmError::Other("Fallback runtime unavailable".to_string()))
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Specific responses are selected when the prompt's user message
/// contains a registered needle; otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use leasehold_llm::MockProvider;
/// use leasehold_domain::traits::LlmProvider;
/// use leasehold_domain::{ChatMessage, ExtractionPrompt};
///
/// let prompt = |text: &str| ExtractionPrompt {
///     system: String::new(),
///     max_tokens: 10,
///     temperature: 0.0,
///     messages: vec![ChatMessage::user(text)],
/// };
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Lease A", "response A");
/// provider.add_response("Lease B", "response B");
/// assert_eq!(provider.generate(&prompt("... Lease A ...")).unwrap(), "response A");
/// assert_eq!(provider.generate(&prompt("... Lease B ...")).unwrap(), "response B");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    responses: Arc<Mutex<Vec<(String, MockReply)>>>,
    prompts: Arc<Mutex<Vec<ExtractionPrompt>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the model name reported by this provider
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Return `response` whenever the user message contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the user message contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), MockReply::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<ExtractionPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// Forget all recorded prompts
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &ExtractionPrompt) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.clone());

        let user_text: String = prompt
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let responses = self.responses.lock().unwrap();
        let matched = responses
            .iter()
            .find(|(needle, _)| user_text.contains(needle.as_str()));

        match matched {
            Some((_, MockReply::Text(response))) => Ok(response.clone()),
            Some((_, MockReply::Error)) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
