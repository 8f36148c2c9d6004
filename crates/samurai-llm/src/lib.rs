//! SAMURAI LLM - LLM Provider Abstraction
//!
//! This crate provides LLM integration for the SAMURAI gateway:
//! - Router: Provider trait and priority-ordered fallback dispatch
//! - Echo: deterministic provider used when nothing else answers
//! - OpenAI / OpenRouter / Hugging Face: OpenAI-compatible HTTP clients
//! - Ollama: Local Ollama provider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod providers;
pub mod router;
pub mod tools;
pub mod util;

pub use error::{Error, Result};
pub use router::{
    ChunkStream, CompletionRequest, CompletionResponse, EchoProvider, LlmProvider, LlmRouter,
    Message, MessageRole, ProviderRegistration, TokenUsage, ToolCall,
};

pub use providers::ollama::{OllamaConfig, OllamaProvider};
pub use providers::openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
