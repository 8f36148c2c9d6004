//! Error types for samurai-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Caller sent an unusable request (empty message, bad options)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// History load or save failed
    #[error("history error: {0}")]
    History(String),

    /// LLM provider error that escaped the router (mid-stream faults)
    #[error("llm error: {0}")]
    Llm(#[from] samurai_llm::Error),

    /// Tool execution error
    #[error("tool error: {0}")]
    Tool(#[from] samurai_tools::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
