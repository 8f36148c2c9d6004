//! LLM Router implementation
//!
//! This module contains the LlmRouter, which owns the registered providers
//! and tries them in priority order.

use super::config::ProviderRegistration;
use super::mock::{EchoProvider, ECHO_ID};
use super::provider::LlmProvider;
use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::message::Message;
use crate::util::sanitize_error_for_user;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// LLM Router with priority-ordered fallback
pub struct LlmRouter {
    priority: Vec<String>,
    providers: HashMap<String, Arc<dyn LlmProvider>>,
    fallback: EchoProvider,
}

impl LlmRouter {
    /// Create a router that tries provider ids in `priority` order
    #[must_use]
    pub fn new<I, S>(priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            priority: priority.into_iter().map(Into::into).collect(),
            providers: HashMap::new(),
            fallback: EchoProvider::new(),
        }
    }

    /// Register a provider; a later registration with the same id wins
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        let name = name.into();
        debug!(provider = %name, "Registering LLM provider");
        self.providers.insert(name, provider);
    }

    /// Get a provider by id
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(name).cloned()
    }

    /// Check if a provider is registered
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered provider ids in try order
    #[must_use]
    pub fn list_providers(&self) -> Vec<&str> {
        self.priority
            .iter()
            .filter(|id| self.providers.contains_key(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Priority list as configured, including ids with no provider
    #[must_use]
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Registered providers with their rank and default model
    #[must_use]
    pub fn registrations(&self) -> Vec<ProviderRegistration> {
        self.priority
            .iter()
            .enumerate()
            .filter_map(|(rank, id)| {
                self.providers.get(id).map(|p| ProviderRegistration {
                    id: id.clone(),
                    priority_rank: rank,
                    default_model: p.default_model().to_string(),
                })
            })
            .collect()
    }

    fn request_for(
        provider: &dyn LlmProvider,
        messages: &[Message],
        model_hint: Option<&str>,
    ) -> CompletionRequest {
        let model = model_hint
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| provider.default_model());
        CompletionRequest::new(model).with_messages(messages.to_vec())
    }

    /// Complete with the first provider that succeeds
    ///
    /// Never fails: when every provider errors (or none is registered) the
    /// echo provider answers.
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    pub async fn complete(
        &self,
        messages: &[Message],
        model_hint: Option<&str>,
    ) -> CompletionResponse {
        for id in &self.priority {
            let Some(provider) = self.providers.get(id) else {
                continue;
            };
            let request = Self::request_for(provider.as_ref(), messages, model_hint);
            match provider.complete(request).await {
                Ok(response) => {
                    debug!(provider = %id, model = %response.model, "Completion succeeded");
                    return response;
                }
                Err(e) => {
                    warn!(
                        provider = %id,
                        error = %sanitize_error_for_user(&e.to_string()),
                        "Provider failed, trying next"
                    );
                }
            }
        }

        warn!("All providers failed, using echo fallback");
        let request = CompletionRequest::new(ECHO_ID).with_messages(messages.to_vec());
        self.fallback.respond(&request)
    }

    /// Open a chunk stream with the first provider that accepts the request
    ///
    /// Faults after the stream is handed out are not retried on another
    /// provider.
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    pub async fn complete_stream(
        &self,
        messages: &[Message],
        model_hint: Option<&str>,
    ) -> ChunkStream {
        for id in &self.priority {
            let Some(provider) = self.providers.get(id) else {
                continue;
            };
            let request = Self::request_for(provider.as_ref(), messages, model_hint);
            match provider.complete_stream(request).await {
                Ok(stream) => {
                    debug!(provider = %id, "Stream opened");
                    return stream;
                }
                Err(e) => {
                    warn!(
                        provider = %id,
                        error = %sanitize_error_for_user(&e.to_string()),
                        "Provider stream failed, trying next"
                    );
                }
            }
        }

        warn!("All providers failed, using echo fallback stream");
        let request = CompletionRequest::new(ECHO_ID).with_messages(messages.to_vec());
        self.fallback.respond_stream(&request)
    }
}

impl Default for LlmRouter {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}
