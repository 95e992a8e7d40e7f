//! Extraction prompt - the structured request sent to an LLM provider

use std::fmt;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Input supplied by the caller
    User,
    /// Output previously produced by the model
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversational turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Who wrote the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A fully assembled request for the inference capability
///
/// Built fresh for every document and never mutated afterwards. Providers
/// translate it into their own wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionPrompt {
    /// System instruction describing the extraction task
    pub system: String,

    /// Maximum number of tokens the model may generate
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f64,

    /// Conversation turns, normally a single user message
    pub messages: Vec<ChatMessage>,
}

impl ExtractionPrompt {
    /// Total characters across the system instruction and all messages
    pub fn char_len(&self) -> usize {
        self.system.len() + self.messages.iter().map(|m| m.content.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_char_len() {
        let prompt = ExtractionPrompt {
            system: "abc".to_string(),
            max_tokens: 10,
            temperature: 0.5,
            messages: vec![ChatMessage::user("defg")],
        };
        assert_eq!(prompt.char_len(), 7);
    }
}
