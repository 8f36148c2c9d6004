//! OpenRouter - Multi-provider LLM Gateway
//!
//! OpenAI-compatible wire format plus the attribution headers OpenRouter
//! uses for app analytics.

use super::openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
use crate::error::Result;

/// Provider id
pub const PROVIDER_ID: &str = "openrouter";

/// OpenRouter API base URL
pub const BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model (lets OpenRouter pick)
pub const DEFAULT_MODEL: &str = "openrouter/auto";

/// Configuration for the OpenRouter API
#[must_use]
pub fn config(api_key: impl Into<String>, app_name: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::new(PROVIDER_ID, api_key, BASE_URL, DEFAULT_MODEL)
        .with_header("HTTP-Referer", "http://localhost")
        .with_header("X-Title", app_name)
}

/// Create an OpenRouter provider
///
/// # Errors
/// Returns an error if the HTTP client cannot be created.
pub fn provider(config: OpenAiCompatConfig) -> Result<OpenAiCompatProvider> {
    OpenAiCompatProvider::new(config)
}
