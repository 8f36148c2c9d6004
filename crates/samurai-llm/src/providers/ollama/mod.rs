//! Ollama - Local Ollama API provider
//!
//! This module implements the Ollama provider for local LLM inference
//! through the native `/api/chat` endpoint. Streaming responses are
//! newline-delimited JSON objects.

/// Message conversion and stream decoding
pub mod convert;
/// Provider implementation
pub mod provider;
/// Error scrubbing
pub mod security;
/// API and configuration types
pub mod types;


pub use provider::OllamaProvider;
pub use types::{OllamaConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
