use super::types::{OllamaChatResponse, OllamaMessage};
use crate::completion::{ChunkStream, CompletionResponse, TokenUsage};
use crate::error::{Error, Result};
use crate::message::Message;
use futures::{future, Stream, StreamExt, TryStreamExt};

/// Convert messages to Ollama format
pub(crate) fn convert_messages(messages: &[Message]) -> Vec<OllamaMessage> {
    messages
        .iter()
        .map(|msg| OllamaMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        })
        .collect()
}

/// Build a `CompletionResponse` from a non-streaming reply
pub(crate) fn convert_response(requested_model: &str, response: OllamaChatResponse) -> CompletionResponse {
    let usage = match (response.prompt_eval_count, response.eval_count) {
        (Some(prompt), Some(completion)) => Some(TokenUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }),
        _ => None,
    };
    let model = if response.model.is_empty() {
        requested_model.to_string()
    } else {
        response.model.clone()
    };

    let mut converted = CompletionResponse::new(response.text(), "ollama", model);
    if let Some(reason) = response.done_reason {
        converted.finish_reason = reason;
    }
    converted.usage = usage;
    converted
}

/// Parse one line of a streaming reply
pub(crate) fn parse_line(line: &str) -> Result<OllamaChatResponse> {
    serde_json::from_str(line).map_err(|e| Error::InvalidResponse(e.to_string()))
}

/// Turn a stream of NDJSON lines into text fragments, ending after `done`
pub(crate) fn ndjson_chunks<S, E>(lines: S) -> ChunkStream
where
    S: Stream<Item = std::result::Result<String, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    lines
        .map_err(|e| Error::Stream(e.to_string()))
        .try_filter(|line| future::ready(!line.trim().is_empty()))
        .and_then(|line| future::ready(parse_line(&line)))
        .scan(false, |finished, item| {
            if *finished {
                return future::ready(None);
            }
            *finished = item.as_ref().map_or(true, |chunk| chunk.done);
            future::ready(Some(item))
        })
        .try_filter_map(|chunk| {
            let text = chunk.text().to_string();
            future::ready(Ok(Some(text).filter(|t| !t.is_empty())))
        })
        .boxed()
}
