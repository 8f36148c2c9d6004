//! Echo provider
//!
//! Deterministic provider used as the router fallback and for offline use.
//! It never fails and never touches the network.

use super::provider::LlmProvider;
use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::error::Result;
use crate::message::Message;
use futures::stream::{self, StreamExt};

/// Prefix of every echo reply
pub const ECHO_PREFIX: &str = "[SAMURAI-MOCK] You said: ";

/// Characters per streamed echo chunk
pub const ECHO_CHUNK_CHARS: usize = 8;

/// Provider id and model name reported by echo replies
pub const ECHO_ID: &str = "mock";

/// Provider that echoes the last message back
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// Create a new echo provider
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Echo reply for `messages`
    #[must_use]
    pub fn reply_for(messages: &[Message]) -> String {
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        format!("{ECHO_PREFIX}{last}")
    }

    /// Infallible completion
    #[must_use]
    pub fn respond(&self, request: &CompletionRequest) -> CompletionResponse {
        CompletionResponse::new(
            Self::reply_for(&request.messages),
            ECHO_ID,
            request.model_or(ECHO_ID),
        )
    }

    /// Infallible streaming completion in fixed-size chunks
    #[must_use]
    pub fn respond_stream(&self, request: &CompletionRequest) -> ChunkStream {
        let chars: Vec<char> = Self::reply_for(&request.messages).chars().collect();
        let chunks: Vec<String> = chars
            .chunks(ECHO_CHUNK_CHARS)
            .map(|c| c.iter().collect())
            .collect();
        stream::iter(chunks.into_iter().map(Ok)).boxed()
    }
}

#[async_trait::async_trait]
impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        ECHO_ID
    }

    fn default_model(&self) -> &str {
        ECHO_ID
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        Ok(self.respond(&request))
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<ChunkStream> {
        Ok(self.respond_stream(&request))
    }
}
