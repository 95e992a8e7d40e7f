//! Provider selection from the active profile.

use crate::config::{Profile, ProviderKind, DEFAULT_API_KEY_ENV};
use crate::error::{CliError, Result};
use leasehold_domain::traits::LlmProvider;
use leasehold_domain::ExtractionPrompt;
use leasehold_llm::{messages, ollama, LlmError, MessagesProvider, OllamaProvider};
use std::time::Duration;

/// The LLM provider named by a profile.
pub enum Provider {
    /// Hosted Messages-style API
    Messages(MessagesProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the provider for `profile`.
    ///
    /// The API key is read from the environment variable the profile names.
    pub fn from_profile(profile: &Profile, timeout: Duration) -> Result<Self> {
        match profile.provider {
            ProviderKind::Messages => {
                let key_env = profile.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
                let api_key = std::env::var(key_env).map_err(|_| {
                    CliError::Config(format!("Environment variable {} is not set", key_env))
                })?;
                let endpoint = profile
                    .endpoint
                    .as_deref()
                    .unwrap_or(messages::DEFAULT_ENDPOINT);
                Ok(Provider::Messages(MessagesProvider::new(
                    endpoint,
                    profile.model.as_str(),
                    api_key,
                    timeout,
                )?))
            }
            ProviderKind::Ollama => {
                let endpoint = profile
                    .endpoint
                    .as_deref()
                    .unwrap_or(ollama::DEFAULT_ENDPOINT);
                Ok(Provider::Ollama(OllamaProvider::with_timeout(
                    endpoint,
                    profile.model.as_str(),
                    timeout,
                )?))
            }
        }
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &ExtractionPrompt) -> std::result::Result<String, LlmError> {
        match self {
            Provider::Messages(p) => LlmProvider::generate(p, prompt),
            Provider::Ollama(p) => LlmProvider::generate(p, prompt),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::Messages(p) => p.model_name(),
            Provider::Ollama(p) => p.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_profile() {
        let profile = Profile {
            provider: ProviderKind::Ollama,
            endpoint: None,
            model: "llama3".to_string(),
            api_key_env: None,
        };
        let provider = Provider::from_profile(&profile, Duration::from_secs(5)).unwrap();
        assert!(matches!(provider, Provider::Ollama(_)));
        assert_eq!(provider.model_name(), "llama3");
    }

    #[test]
    fn test_messages_profile_requires_key() {
        let profile = Profile {
            provider: ProviderKind::Messages,
            endpoint: None,
            model: "claude-test".to_string(),
            api_key_env: Some("LEASEHOLD_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
        };
        match Provider::from_profile(&profile, Duration::from_secs(5)) {
            Err(CliError::Config(msg)) => {
                assert!(msg.contains("LEASEHOLD_TEST_KEY_THAT_IS_NEVER_SET"))
            }
            _ => panic!("Expected Config error"),
        }
    }
}
