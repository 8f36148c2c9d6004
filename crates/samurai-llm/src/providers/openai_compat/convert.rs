use super::types::{ApiErrorBody, ChatMessage, ChatResponse};
use crate::completion::{CompletionResponse, TokenUsage};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::tools::ToolCall;

/// Convert a transcript message to the wire format
pub(crate) fn convert_message(msg: &Message) -> ChatMessage {
    ChatMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
        name: msg.name.clone(),
    }
}

/// Build a `CompletionResponse` from a decoded response body
pub(crate) fn convert_response(
    provider: &str,
    requested_model: &str,
    response: ChatResponse,
) -> Result<CompletionResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

    let tool_calls = choice.message.tool_calls.map(|calls| {
        calls
            .into_iter()
            .map(|c| ToolCall {
                id: c.id,
                name: c.function.name,
                arguments: c.function.arguments,
            })
            .collect::<Vec<_>>()
    });

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        provider: provider.to_string(),
        model: response
            .model
            .unwrap_or_else(|| requested_model.to_string()),
        finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
        tool_calls: tool_calls.filter(|c| !c.is_empty()),
    })
}

/// Extract the error message from an error body, falling back to the raw text
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Sanitize API error messages
pub(crate) fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your API key configuration.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if error.chars().count() > 300 {
        format!("{}...(truncated)", crate::util::truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}
