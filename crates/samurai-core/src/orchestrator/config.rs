//! Orchestrator configuration
//!
//! Contains the turn request/response types and `OrchestratorConfig`.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Session used when the request names none
pub const DEFAULT_SESSION_ID: &str = "default";

/// Prefix of the reply that replaces a schema-violating answer
pub const SCHEMA_MISMATCH_PREFIX: &str = "The output did not match the requested schema. Errors:\n";

/// `null` deserializes to the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Per-turn options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnOptions {
    /// Tool to run before the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Run the debate protocol instead of a single completion
    #[serde(default, deserialize_with = "null_as_default")]
    pub debate: bool,
    /// Model hint passed to every provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// JSON Schema the reply must satisfy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl TurnOptions {
    /// Set the tool
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Enable debate mode
    #[must_use]
    pub fn with_debate(mut self, debate: bool) -> Self {
        self.debate = debate;
        self
    }

    /// Set the model hint
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the reply schema
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Tool name, ignoring empty strings
    #[must_use]
    pub fn tool_name(&self) -> Option<&str> {
        self.tool.as_deref().filter(|t| !t.is_empty())
    }

    /// Model hint, ignoring empty strings
    #[must_use]
    pub fn model_hint(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }
}

/// Inbound turn request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Session id (`sessionId` is accepted too)
    #[serde(default, alias = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// User message
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Turn options
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: TurnOptions,
}

impl TurnRequest {
    /// Create a new request
    #[must_use]
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            message: message.into(),
            options: TurnOptions::default(),
        }
    }

    /// Set the options
    #[must_use]
    pub fn with_options(mut self, options: TurnOptions) -> Self {
        self.options = options;
        self
    }

    /// Session id, defaulting to `"default"` when absent or empty
    #[must_use]
    pub fn session_key(&self) -> &str {
        self.session_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
    }

    /// Trimmed message
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` when the message is blank.
    pub fn validated_message(&self) -> Result<&str> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(Error::InvalidInput("message is required".to_string()));
        }
        Ok(message)
    }
}

/// Result of a synchronous turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnResponse {
    /// Assistant reply
    Reply {
        /// Reply text
        reply: String,
    },
    /// Turn rejected without side effects (unknown tool)
    Error {
        /// Error text
        error: String,
    },
}

impl TurnResponse {
    /// Reply text, if the turn completed
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Reply { reply } => Some(reply),
            Self::Error { .. } => None,
        }
    }
}

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Serialize turns that target the same session
    pub serialize_sessions: bool,
    /// Capacity of the channel between a streaming turn and its consumer
    pub stream_buffer: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            serialize_sessions: true,
            stream_buffer: 32,
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable per-session turn serialization
    #[must_use]
    pub fn with_serialize_sessions(mut self, serialize: bool) -> Self {
        self.serialize_sessions = serialize;
        self
    }

    /// Set the streaming channel capacity (minimum 1)
    #[must_use]
    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }
}
