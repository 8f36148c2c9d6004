//! OpenAI - chat completions API

use super::openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
use crate::error::Result;

/// Provider id
pub const PROVIDER_ID: &str = "openai";

/// OpenAI API base URL
pub const BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI API
#[must_use]
pub fn config(api_key: impl Into<String>) -> OpenAiCompatConfig {
    OpenAiCompatConfig::new(PROVIDER_ID, api_key, BASE_URL, DEFAULT_MODEL)
}

/// Create an OpenAI provider
///
/// # Errors
/// Returns an error if the HTTP client cannot be created.
pub fn provider(config: OpenAiCompatConfig) -> Result<OpenAiCompatProvider> {
    OpenAiCompatProvider::new(config)
}
