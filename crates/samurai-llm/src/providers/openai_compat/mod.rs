//! OpenAI-compatible chat completions client
//!
//! Shared by every backend that speaks the `/chat/completions` wire format
//! (OpenAI, OpenRouter, the Hugging Face inference router).

/// Message conversion and response parsing
pub mod convert;
/// Provider implementation
pub mod provider;
/// Server-sent event stream decoding
pub mod stream;
/// Wire and configuration types
pub mod types;


pub use provider::OpenAiCompatProvider;
pub use types::OpenAiCompatConfig;
