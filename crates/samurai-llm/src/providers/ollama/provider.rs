use crate::completion::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::providers::ollama::{
    convert, security,
    types::{OllamaChatRequest, OllamaChatResponse, OllamaConfig, OllamaError},
};
use crate::router::LlmProvider;
use futures::TryStreamExt;
use reqwest::{Client, RequestBuilder};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;
use tracing::{debug, instrument};

/// Ollama local provider
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// The configured timeout covers connecting and whole non-streaming
    /// calls only.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(OllamaConfig::default())
    }

    pub(crate) fn build_body(&self, request: &CompletionRequest, stream: bool) -> OllamaChatRequest {
        OllamaChatRequest {
            model: request.model_or(&self.config.default_model).to_string(),
            messages: convert::convert_messages(&request.messages),
            stream,
        }
    }

    pub(crate) fn request(&self, body: &OllamaChatRequest) -> RequestBuilder {
        let request = self.client.post(self.config.chat_url()).json(body);
        if body.stream {
            request
        } else {
            request.timeout(self.config.timeout)
        }
    }

    /// Send request to Ollama API, returning the response on success status
    async fn send(&self, body: &OllamaChatRequest) -> Result<reqwest::Response> {
        debug!(model = %body.model, stream = body.stream, "Sending request to Ollama");

        let response = self
            .request(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::Network(format!(
                        "Failed to connect to Ollama at {}. Is Ollama running?",
                        self.config.base_url
                    ))
                } else if e.is_timeout() {
                    Error::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    Error::Network(security::sanitize_api_error(&e.to_string()))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let message = serde_json::from_str::<OllamaError>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(Error::Api(format!(
            "{}: {}",
            status.as_u16(),
            security::sanitize_api_error(&message)
        )))
    }
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_body(&request, false);
        let response = self.send(&body).await?;
        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        Ok(convert::convert_response(&body.model, parsed))
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete_stream(&self, request: CompletionRequest) -> Result<ChunkStream> {
        let body = self.build_body(&request, true);
        let response = self.send(&body).await?;

        let reader = StreamReader::new(response.bytes_stream().map_err(std::io::Error::other));
        let lines = FramedRead::new(reader, LinesCodec::new());
        Ok(convert::ndjson_chunks(lines))
    }
}
