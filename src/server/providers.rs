//! LLM provider resolution
//!
//! Builds the router from the configured priority list. Every known adapter
//! is registered; adapters without credentials fail on their first call and
//! the router moves on.

use super::config::{LlmConfig, ProviderEndpointConfig};
use samurai_llm::providers::{huggingface, openai, openrouter};
use samurai_llm::util::mask_api_key;
use samurai_llm::{
    EchoProvider, LlmProvider, LlmRouter, OllamaConfig, OllamaProvider, OpenAiCompatConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Id of the always-available echo provider
pub const MOCK_PROVIDER_ID: &str = "mock";

const OLLAMA_PROVIDER_ID: &str = "ollama";

fn env_key(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn apply_endpoint(config: OpenAiCompatConfig, endpoint: &ProviderEndpointConfig) -> OpenAiCompatConfig {
    config
        .with_base_url(endpoint.base_url.clone())
        .with_model(endpoint.default_model.clone())
        .with_timeout(Duration::from_secs(endpoint.timeout_secs))
}

fn log_key(provider: &str, key: &str) {
    if key.is_empty() {
        warn!(provider = %provider, "API key not set, provider will be skipped at call time");
    } else {
        debug!(provider = %provider, api_key = %mask_api_key(key), "API key loaded");
    }
}

fn register<P>(router: &mut LlmRouter, id: &str, provider: samurai_llm::Result<P>)
where
    P: LlmProvider + 'static,
{
    match provider {
        Ok(provider) => router.register(id, Arc::new(provider)),
        Err(e) => warn!(provider = %id, error = %e, "Failed to create provider, leaving it out"),
    }
}

/// Build the LLM router from configuration and environment API keys
pub fn resolve_llm_router(llm_config: &LlmConfig, app_name: &str) -> Arc<LlmRouter> {
    let mut router = LlmRouter::new(llm_config.priority.iter().cloned());

    let openai_key = env_key("OPENAI_API_KEY");
    log_key(openai::PROVIDER_ID, &openai_key);
    let mut openai_config = apply_endpoint(openai::config(openai_key), &llm_config.openai);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        if !base_url.is_empty() {
            openai_config = openai_config.with_base_url(base_url);
        }
    }
    register(&mut router, openai::PROVIDER_ID, openai::provider(openai_config));

    let openrouter_key = env_key("OPENROUTER_API_KEY");
    log_key(openrouter::PROVIDER_ID, &openrouter_key);
    let openrouter_config = apply_endpoint(
        openrouter::config(openrouter_key, app_name),
        &llm_config.openrouter,
    );
    register(
        &mut router,
        openrouter::PROVIDER_ID,
        openrouter::provider(openrouter_config),
    );

    let hf_key = env_key("HF_API_KEY");
    log_key(huggingface::PROVIDER_ID, &hf_key);
    let hf_config = apply_endpoint(huggingface::config(hf_key), &llm_config.hf);
    register(&mut router, huggingface::PROVIDER_ID, huggingface::provider(hf_config));

    let ollama_config = OllamaConfig::new()
        .with_base_url(llm_config.ollama.base_url.clone())
        .with_model(llm_config.ollama.default_model.clone())
        .with_timeout(Duration::from_secs(llm_config.ollama.timeout_secs));
    register(&mut router, OLLAMA_PROVIDER_ID, OllamaProvider::new(ollama_config));

    router.register(MOCK_PROVIDER_ID, Arc::new(EchoProvider::new()));

    for id in router.priority() {
        if !router.has_provider(id) {
            warn!(provider = %id, "Unknown provider in priority list, ignoring");
        }
    }

    info!(providers = ?router.list_providers(), "LLM router ready");
    Arc::new(router)
}
