//! LLM Provider trait definition
//!
//! This module defines the core trait that all LLM providers must implement.

use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::error::Result;

/// Trait for LLM providers
///
/// Implementations hold their credentials and base URL from construction.
/// Missing credentials are reported from the first call, not from the
/// constructor.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider id
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Start a streaming completion
    ///
    /// Returning `Ok` means the backend accepted the request; later faults
    /// surface as `Err` items on the stream.
    async fn complete_stream(&self, request: CompletionRequest) -> Result<ChunkStream>;
}
