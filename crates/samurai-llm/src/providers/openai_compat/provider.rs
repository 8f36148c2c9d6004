use super::convert::{convert_message, convert_response, error_message, sanitize_api_error};
use super::stream::sse_chunks;
use super::types::{ChatRequest, ChatResponse, OpenAiCompatConfig};
use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::router::LlmProvider;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, instrument};

/// Provider for any OpenAI-compatible chat completions endpoint
pub struct OpenAiCompatProvider {
    client: Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatProvider {
    /// Create a new provider
    ///
    /// An empty API key is accepted here and reported on the first call.
    /// The configured timeout bounds connecting and whole non-streaming
    /// calls; streams may run longer once connected.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Access the configuration
    #[must_use]
    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }

    pub(crate) fn build_body(&self, request: &CompletionRequest, stream: bool) -> ChatRequest {
        ChatRequest {
            model: request.model_or(&self.config.default_model).to_string(),
            messages: request.messages.iter().map(convert_message).collect(),
            stream,
        }
    }

    pub(crate) fn request(&self, body: &ChatRequest) -> RequestBuilder {
        let mut request = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json");

        for (name, value) in &self.config.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !body.stream {
            request = request.timeout(self.config.timeout);
        }
        request.json(body)
    }

    /// Send the request and return the response if the status is a success
    async fn send(&self, body: &ChatRequest) -> Result<reqwest::Response> {
        if self.config.api_key.is_empty() {
            return Err(Error::NotConfigured(format!(
                "{} API key not set",
                self.config.id
            )));
        }

        let response = self
            .request(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Err(Error::Api(format!(
            "{}: {}",
            status.as_u16(),
            sanitize_api_error(&error_message(&text))
        )))
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.config.id
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.id, model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_body(&request, false);
        debug!(messages = body.messages.len(), "Sending chat completion request");

        let response = self.send(&body).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        convert_response(&self.config.id, &body.model, parsed)
    }

    #[instrument(skip(self, request), fields(provider = %self.config.id, model = %request.model))]
    async fn complete_stream(&self, request: CompletionRequest) -> Result<ChunkStream> {
        let body = self.build_body(&request, true);
        debug!(messages = body.messages.len(), "Opening chat completion stream");

        let response = self.send(&body).await?;
        Ok(sse_chunks(response.bytes_stream()))
    }
}
