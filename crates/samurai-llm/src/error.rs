//! Error types for samurai-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured (missing credentials, unknown id)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API error
    #[error("api error: {0}")]
    Api(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimit,

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Stream terminated with an error after it started
    #[error("stream error: {0}")]
    Stream(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
