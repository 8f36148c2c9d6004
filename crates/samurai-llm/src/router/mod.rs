//! Router - LLM Provider abstraction and priority dispatch
//!
//! This module defines the core trait for LLM providers and the router that
//! tries them in a configured priority order, falling back to a deterministic
//! echo provider when every configured provider fails.
//!
//! # Module Structure
//!
//! - `config`: Provider registration records
//! - `provider`: LlmProvider trait definition
//! - `mock`: Echo provider (fallback and offline mode)
//! - `router_impl`: LlmRouter implementation

mod config;
mod mock;
mod provider;
mod router_impl;

#[cfg(test)]
mod tests;

pub use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse, TokenUsage};
pub use crate::message::{Message, MessageRole};
pub use crate::tools::ToolCall;

pub use config::ProviderRegistration;
pub use mock::{EchoProvider, ECHO_CHUNK_CHARS, ECHO_ID, ECHO_PREFIX};
pub use provider::LlmProvider;
pub use router_impl::LlmRouter;
