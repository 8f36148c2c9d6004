use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama model
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default Ollama API URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

// ============================================================================
// API Types
// ============================================================================

/// Request for the Ollama chat endpoint
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    /// The model name to use
    pub model: String,
    /// List of messages in the conversation
    pub messages: Vec<OllamaMessage>,
    /// Whether to stream the response
    pub stream: bool,
}

/// Message format for Ollama chat
#[derive(Debug, Serialize)]
pub struct OllamaMessage {
    /// Role of the message sender (system, user, assistant, tool)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Response from the Ollama chat endpoint; also one line of a stream
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    /// The model used to generate the response
    #[serde(default)]
    pub model: String,
    /// The generated message (absent on some terminal stream lines)
    #[serde(default)]
    pub message: Option<OllamaResponseMessage>,
    /// Whether generation is finished
    #[serde(default)]
    pub done: bool,
    /// Why generation stopped
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Number of tokens in the prompt
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Number of tokens generated
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl OllamaChatResponse {
    /// Text carried by this response
    #[must_use]
    pub fn text(&self) -> &str {
        self.message.as_ref().map_or("", |m| m.content.as_str())
    }
}

/// Message format in Ollama responses
#[derive(Debug, Deserialize)]
pub struct OllamaResponseMessage {
    /// Role of the message sender
    #[serde(default)]
    pub role: String,
    /// Content of the message
    #[serde(default)]
    pub content: String,
}

/// Error response from Ollama API
#[derive(Debug, Deserialize)]
pub struct OllamaError {
    /// Error message
    pub error: String,
}

/// Ollama provider configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL (default: http://localhost:11434)
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout (longer for local inference)
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl OllamaConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chat endpoint URL
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}
