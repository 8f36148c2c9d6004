//! Hugging Face - inference router (OpenAI-compatible chat endpoint)

use super::openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
use crate::error::Result;

/// Provider id
pub const PROVIDER_ID: &str = "hf";

/// Inference router base URL
pub const BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Configuration for the Hugging Face inference router
#[must_use]
pub fn config(api_key: impl Into<String>) -> OpenAiCompatConfig {
    OpenAiCompatConfig::new(PROVIDER_ID, api_key, BASE_URL, DEFAULT_MODEL)
}

/// Create a Hugging Face provider
///
/// # Errors
/// Returns an error if the HTTP client cannot be created.
pub fn provider(config: OpenAiCompatConfig) -> Result<OpenAiCompatProvider> {
    OpenAiCompatProvider::new(config)
}
