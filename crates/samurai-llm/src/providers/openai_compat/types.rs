use crate::util::mask_api_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for an OpenAI-compatible backend
#[derive(Clone)]
pub struct OpenAiCompatConfig {
    /// Provider id used for routing and logging
    pub id: String,
    /// API key (empty means not configured)
    pub api_key: String,
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
    /// Extra headers sent with every request
    pub extra_headers: Vec<(String, String)>,
}

impl fmt::Debug for OpenAiCompatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatConfig")
            .field("id", &self.id)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiCompatConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            default_model: default_model.into(),
            timeout: Duration::from_secs(60),
            extra_headers: Vec::new(),
        }
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

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Completions endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Chat message on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role
    pub role: String,
    /// Content
    pub content: String,
    /// Author name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Chat completions request body
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model id
    pub model: String,
    /// Conversation
    pub messages: Vec<ChatMessage>,
    /// Whether to stream server-sent events
    pub stream: bool,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Model that answered
    #[serde(default)]
    pub model: Option<String>,
    /// Choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// A single choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Message
    pub message: ChatChoiceMessage,
    /// Finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    /// Text content (absent for pure tool-call replies)
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Tool call on the wire
#[derive(Debug, Deserialize)]
pub struct WireToolCall {
    /// Call id
    #[serde(default)]
    pub id: String,
    /// Function payload
    pub function: WireFunctionCall,
}

/// Function call on the wire
#[derive(Debug, Deserialize)]
pub struct WireFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
}

/// Token usage on the wire
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// Streaming chunk body
#[derive(Debug, Deserialize)]
pub struct ChatStreamChunk {
    /// Choices carrying deltas
    #[serde(default)]
    pub choices: Vec<ChatStreamChoice>,
}

/// Streaming choice
#[derive(Debug, Deserialize)]
pub struct ChatStreamChoice {
    /// Incremental delta
    #[serde(default)]
    pub delta: Option<ChatDelta>,
}

/// Incremental delta
#[derive(Debug, Deserialize)]
pub struct ChatDelta {
    /// Text fragment
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Error details
    pub error: ApiErrorDetail,
}

/// Error details
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable message
    pub message: String,
}
