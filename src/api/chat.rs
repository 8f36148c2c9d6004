//! Chat API endpoints
//!
//! POST /api/chat        - One turn, JSON reply
//! POST /api/chat/stream - One turn as server-sent events

use super::error::ApiError;
use axum::extract::Extension;
use axum::response::sse::{Event, Sse};
use axum::routing::post;
use axum::{Json, Router};
use futures::stream::{self, Stream};
use samurai_core::{ChatOrchestrator, StreamEvent, TurnRequest, TurnResponse};
use serde_json::json;
use std::convert::Infallible;
use tracing::warn;

/// Run a turn and return `{reply}` or `{error}`
async fn chat(
    Extension(orchestrator): Extension<ChatOrchestrator>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    Ok(Json(orchestrator.run_turn(request).await?))
}

fn sse_event(event: StreamEvent) -> Event {
    let data = match event {
        StreamEvent::Chunk(chunk) => json!({ "chunk": chunk }),
        StreamEvent::End => json!({ "event": "end" }),
    };
    Event::default().data(data.to_string())
}

/// Stream a turn as `data: {"chunk": ...}` frames ending with `{"event": "end"}`
///
/// A fault mid-stream closes the response without the end frame.
async fn chat_stream(
    Extension(orchestrator): Extension<ChatOrchestrator>,
    Json(request): Json<TurnRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let session_id = request.session_key().to_string();
    let rx = orchestrator.stream_turn(request)?;

    let events = stream::unfold((rx, session_id), |(mut rx, session_id)| async move {
        match rx.recv().await? {
            Ok(event) => Some((Ok(sse_event(event)), (rx, session_id))),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Closing stream after fault");
                None
            }
        }
    });

    Ok(Sse::new(events))
}

/// Create chat routes
pub fn chat_routes() -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/stream", post(chat_stream))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{memory_app, post_json, send, test_app};
    use axum::http::StatusCode;
    use samurai_core::HistoryStore;
    use samurai_llm::router::ECHO_PREFIX;
    use samurai_llm::MessageRole;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_chat_echo_reply() {
        let (app, history) = memory_app();
        let (status, body) = send(
            app,
            post_json("/api/chat", json!({"sessionId": "web", "message": "hello"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"reply": format!("{ECHO_PREFIX}hello")}));
        assert_eq!(history.load("web").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_blank_message_is_400() {
        let (app, history) = memory_app();
        let (status, body) = send(app, post_json("/api/chat", json!({"message": "   "}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"detail": "message is required"}));
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn test_chat_unknown_tool() {
        let (app, history) = memory_app();
        let (status, body) = send(
            app,
            post_json(
                "/api/chat",
                json!({"message": "hi", "options": {"tool": "nonexistent"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"error": "unknown tool: nonexistent"}));
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn test_chat_with_tool_defaults_session() {
        let (app, history) = memory_app();
        let (status, _) = send(
            app,
            post_json("/api/chat", json!({"message": "hi", "options": {"tool": "time.now"}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let transcript = history.load("default").await.unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, MessageRole::Tool);
    }

    #[tokio::test]
    async fn test_chat_stream_frames() {
        let (app, history) = memory_app();
        let (status, body) = send(
            app,
            post_json("/api/chat/stream", json!({"session_id": "sse", "message": "stream me"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let frames: Vec<Value> = body
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .map(|data| serde_json::from_str(data).unwrap())
            .collect();

        assert_eq!(frames.last(), Some(&json!({"event": "end"})));
        let text: String = frames
            .iter()
            .filter_map(|f| f["chunk"].as_str())
            .collect();
        assert_eq!(text, format!("{ECHO_PREFIX}stream me"));

        let transcript = history.load("sse").await.unwrap();
        assert_eq!(transcript[1].content, text);
    }

    #[tokio::test]
    async fn test_chat_stream_blank_message_is_400() {
        let app = test_app(std::sync::Arc::new(samurai_core::MemoryHistoryStore::new()));
        let (status, _) = send(app, post_json("/api/chat/stream", json!({"message": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
