//! Completion request and response types
//!
//! This module defines the types for LLM completion requests and responses,
//! plus the chunk stream shape used by streaming completions.

use crate::error::Result;
use crate::message::Message;
use crate::tools::ToolCall;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Incremental text fragments of a streaming completion.
///
/// Finite and non-restartable; the stream ends when the provider finishes.
/// An `Err` item means the stream failed after it started.
pub type ChunkStream = BoxStream<'static, Result<String>>;

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Model to use (provider-specific; empty means the provider default)
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Create a new completion request
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add messages
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Model to send, falling back to `default_model` when unset
    #[must_use]
    pub fn model_or<'a>(&'a self, default_model: &'a str) -> &'a str {
        if self.model.is_empty() {
            default_model
        } else {
            &self.model
        }
    }
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Id of the provider that produced the response
    pub provider: String,
    /// Model used
    pub model: String,
    /// Finish reason
    pub finish_reason: String,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl CompletionResponse {
    /// Create a response with finish reason `stop` and no usage data
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            provider: provider.into(),
            model: model.into(),
            finish_reason: "stop".to_string(),
            usage: None,
            tool_calls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new("gpt-4o-mini")
            .with_message(Message::system("You are helpful"))
            .with_messages(vec![Message::user("Hello"), Message::assistant("Hi")]);

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.model_or("other"), "gpt-4o-mini");
    }

    #[test]
    fn test_model_or_default() {
        let request = CompletionRequest::default();
        assert_eq!(request.model_or("llama3.1"), "llama3.1");
    }

    #[test]
    fn test_completion_response_defaults() {
        let response = CompletionResponse::new("hello", "openai", "gpt-4o-mini");
        assert_eq!(response.finish_reason, "stop");
        assert!(response.usage.is_none());
        assert!(response.tool_calls.is_none());
    }
}
