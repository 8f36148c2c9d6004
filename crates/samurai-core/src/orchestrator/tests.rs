//! Tests for orchestrator module

use super::*;
use crate::error::Error;
use crate::history::{FileHistoryStore, HistoryStore, MemoryHistoryStore, MockHistoryStore};
use futures::stream::{self, StreamExt};
use samurai_llm::router::ECHO_PREFIX;
use samurai_llm::{
    ChunkStream, CompletionRequest, CompletionResponse, LlmProvider, LlmRouter, Message,
    MessageRole,
};
use samurai_tools::ToolRegistry;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

type ReplyFn = dyn Fn(&[Message]) -> samurai_llm::Result<String> + Send + Sync;

/// Provider answering from a closure and recording every request
struct ScriptedProvider {
    reply: Box<ReplyFn>,
    delay: Option<Duration>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    fn new<F>(reply: F) -> Arc<Self>
    where
        F: Fn(&[Message]) -> samurai_llm::Result<String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            reply: Box::new(reply),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn fixed(text: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(text.to_string()))
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(|_| Ok("done".to_string())),
            delay: Some(delay),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(&self, request: &CompletionRequest) -> samurai_llm::Result<String> {
        self.requests.lock().unwrap().push(request.messages.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.reply)(&request.messages)
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: CompletionRequest) -> samurai_llm::Result<CompletionResponse> {
        let text = self.answer(&request).await?;
        Ok(CompletionResponse::new(text, "scripted", request.model))
    }

    async fn complete_stream(&self, request: CompletionRequest) -> samurai_llm::Result<ChunkStream> {
        let text = self.answer(&request).await?;
        let words: Vec<samurai_llm::Result<String>> = text
            .split_inclusive(' ')
            .map(|w| Ok(w.to_string()))
            .collect();
        Ok(stream::iter(words).boxed())
    }
}

/// Provider whose stream fails after the first chunk
struct BrokenStreamProvider;

#[async_trait::async_trait]
impl LlmProvider for BrokenStreamProvider {
    fn name(&self) -> &str {
        "broken"
    }

    fn default_model(&self) -> &str {
        "broken-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> samurai_llm::Result<CompletionResponse> {
        Err(samurai_llm::Error::Api("unused".to_string()))
    }

    async fn complete_stream(&self, _request: CompletionRequest) -> samurai_llm::Result<ChunkStream> {
        let items = vec![
            Ok("partial ".to_string()),
            Err(samurai_llm::Error::Stream("connection reset".to_string())),
        ];
        Ok(stream::iter(items).boxed())
    }
}

fn router_with(provider: Arc<dyn LlmProvider>) -> Arc<LlmRouter> {
    let mut router = LlmRouter::new(["scripted"]);
    router.register("scripted", provider);
    Arc::new(router)
}

fn orchestrator(llm: Arc<LlmRouter>, history: Arc<dyn HistoryStore>) -> ChatOrchestrator {
    ChatOrchestrator::new(llm, Arc::new(ToolRegistry::with_builtins()), history)
}

async fn collect_events(
    mut rx: mpsc::Receiver<crate::Result<StreamEvent>>,
) -> Vec<crate::Result<StreamEvent>> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

fn chunk_text(events: &[crate::Result<StreamEvent>]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Ok(StreamEvent::Chunk(text)) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Request types
// ============================================================================

#[test]
fn test_turn_request_deserialize_aliases() {
    let request: TurnRequest = serde_json::from_value(json!({
        "sessionId": "abc",
        "message": "  hi  ",
        "options": {"tool": "time.now", "debate": true, "model": "gpt-4o-mini"}
    }))
    .unwrap();

    assert_eq!(request.session_key(), "abc");
    assert_eq!(request.validated_message().unwrap(), "hi");
    assert_eq!(request.options.tool_name(), Some("time.now"));
    assert!(request.options.debate);
    assert_eq!(request.options.model_hint(), Some("gpt-4o-mini"));
}

#[test]
fn test_turn_request_defaults() {
    let request: TurnRequest =
        serde_json::from_value(json!({"message": "hi", "options": null, "session_id": ""}))
            .unwrap();
    assert_eq!(request.session_key(), DEFAULT_SESSION_ID);
    assert_eq!(request.options, TurnOptions::default());

    let empty: TurnRequest = serde_json::from_value(json!({})).unwrap();
    assert!(matches!(empty.validated_message(), Err(Error::InvalidInput(_))));
}

#[test]
fn test_turn_options_ignore_empty_strings() {
    let options = TurnOptions::default().with_tool("").with_model("");
    assert!(options.tool_name().is_none());
    assert!(options.model_hint().is_none());
}

#[test]
fn test_turn_response_shape() {
    let reply = TurnResponse::Reply { reply: "hi".into() };
    assert_eq!(serde_json::to_value(&reply).unwrap(), json!({"reply": "hi"}));
    assert_eq!(reply.reply(), Some("hi"));

    let error = TurnResponse::Error { error: "unknown tool: x".into() };
    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({"error": "unknown tool: x"})
    );
    assert!(error.reply().is_none());
}

#[test]
fn test_stream_buffer_minimum() {
    let config = OrchestratorConfig::new().with_stream_buffer(0);
    assert_eq!(config.stream_buffer, 1);
    assert!(config.serialize_sessions);
}

// ============================================================================
// Synchronous turns
// ============================================================================

#[tokio::test]
async fn test_plain_turn_grows_transcript_by_two() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(Arc::new(LlmRouter::default()), history.clone());

    let response = orch.run_turn(TurnRequest::new("s1", "hello")).await.unwrap();
    assert_eq!(response.reply(), Some(format!("{ECHO_PREFIX}hello").as_str()));

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0], Message::user("hello"));
    assert_eq!(transcript[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_second_turn_sees_history() {
    let provider = ScriptedProvider::fixed("ok");
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(router_with(provider.clone()), history.clone());

    orch.run_turn(TurnRequest::new("s1", "first")).await.unwrap();
    orch.run_turn(TurnRequest::new("s1", "second")).await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].len(), 3);
    assert_eq!(requests[1][2], Message::user("second"));
    assert_eq!(history.load("s1").await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let mut history = MockHistoryStore::new();
    history.expect_load().times(0);
    history.expect_save().times(0);
    let orch = orchestrator(Arc::new(LlmRouter::default()), Arc::new(history));

    let err = orch.run_turn(TurnRequest::new("s1", "   ")).await.unwrap_err();
    assert!(err.is_client_error());
    assert!(orch.stream_turn(TurnRequest::new("s1", "")).is_err());
}

#[tokio::test]
async fn test_unknown_tool_does_not_persist() {
    let mut history = MockHistoryStore::new();
    history.expect_load().times(1).returning(|_| Ok(Vec::new()));
    history.expect_save().times(0);
    history
        .expect_storage_key()
        .returning(|session_id| session_id.to_string());
    let orch = orchestrator(Arc::new(LlmRouter::default()), Arc::new(history));

    let request = TurnRequest::new("s1", "hi")
        .with_options(TurnOptions::default().with_tool("nonexistent"));
    let response = orch.run_turn(request).await.unwrap();

    assert_eq!(
        response,
        TurnResponse::Error {
            error: "unknown tool: nonexistent".to_string()
        }
    );
}

#[tokio::test]
async fn test_tool_output_precedes_completion() {
    let provider = ScriptedProvider::fixed("done");
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(router_with(provider.clone()), history.clone());

    let request = TurnRequest::new("s1", "hi")
        .with_options(TurnOptions::default().with_tool("shell.echo"));
    orch.run_turn(request).await.unwrap();

    let sent = &provider.requests()[0];
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].role, MessageRole::Tool);
    assert_eq!(sent[1].name.as_deref(), Some("shell.echo"));
    let output: serde_json::Value = serde_json::from_str(&sent[1].content).unwrap();
    assert_eq!(output, json!({"echo": "hi"}));

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2], Message::assistant("done"));
}

#[tokio::test]
async fn test_model_hint_forwarded() {
    struct ModelRecorder(Mutex<Vec<String>>);

    #[async_trait::async_trait]
    impl LlmProvider for ModelRecorder {
        fn name(&self) -> &str {
            "recorder"
        }
        fn default_model(&self) -> &str {
            "recorder-default"
        }
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> samurai_llm::Result<CompletionResponse> {
            self.0.lock().unwrap().push(request.model.clone());
            Ok(CompletionResponse::new("ok", "recorder", request.model))
        }
        async fn complete_stream(
            &self,
            _request: CompletionRequest,
        ) -> samurai_llm::Result<ChunkStream> {
            Err(samurai_llm::Error::Api("unused".to_string()))
        }
    }

    let recorder = Arc::new(ModelRecorder(Mutex::new(Vec::new())));
    let orch = orchestrator(
        router_with(recorder.clone()),
        Arc::new(MemoryHistoryStore::new()),
    );

    orch.run_turn(TurnRequest::new("s1", "a")).await.unwrap();
    let hinted =
        TurnRequest::new("s1", "b").with_options(TurnOptions::default().with_model("custom"));
    orch.run_turn(hinted).await.unwrap();

    assert_eq!(*recorder.0.lock().unwrap(), vec!["recorder-default", "custom"]);
}

// ============================================================================
// Debate
// ============================================================================

fn debate_reply(messages: &[Message]) -> samurai_llm::Result<String> {
    let prompt = messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str())
        .unwrap_or_default();
    let reply = match prompt {
        EXPERT_A_PROMPT => "proposal",
        EXPERT_B_PROMPT => "critique",
        SYNTHESIS_PROMPT => "final plan",
        _ => "unexpected",
    };
    Ok(reply.to_string())
}

#[tokio::test]
async fn test_debate_persists_only_synthesis() {
    let provider = ScriptedProvider::new(debate_reply);
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(router_with(provider.clone()), history.clone());

    let request =
        TurnRequest::new("s1", "plan it").with_options(TurnOptions::default().with_debate(true));
    let response = orch.run_turn(request).await.unwrap();
    assert_eq!(response.reply(), Some("final plan"));

    let requests = provider.requests();
    assert_eq!(requests.len(), 3);

    let synthesis = requests
        .iter()
        .find(|r| r.iter().any(|m| m.content == SYNTHESIS_PROMPT))
        .unwrap();
    assert_eq!(synthesis.len(), 4);
    let expert_replies: Vec<&str> = synthesis[2..].iter().map(|m| m.content.as_str()).collect();
    assert_eq!(expert_replies, vec!["proposal", "critique"]);
    assert!(synthesis[2..].iter().all(|m| m.role == MessageRole::Assistant));

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(
        transcript,
        vec![Message::user("plan it"), Message::assistant("final plan")]
    );
}

// ============================================================================
// Schema validation
// ============================================================================

#[tokio::test]
async fn test_schema_mismatch_replaces_reply() {
    let provider = ScriptedProvider::fixed(r#"{"name": 5}"#);
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(router_with(provider), history.clone());

    let schema = json!({
        "type": "object",
        "properties": {"name": {"type": "string"}},
        "required": ["name", "age"]
    });
    let request =
        TurnRequest::new("s1", "give json").with_options(TurnOptions::default().with_schema(schema));
    let reply = orch.run_turn(request).await.unwrap().reply().unwrap().to_string();

    assert!(reply.starts_with(SCHEMA_MISMATCH_PREFIX));
    let report = &reply[SCHEMA_MISMATCH_PREFIX.len()..];
    assert_eq!(report.lines().count(), 2);
    assert!(report.contains("age"));

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(transcript[1].content, reply);
}

#[tokio::test]
async fn test_schema_unparseable_reply() {
    let orch = orchestrator(
        router_with(ScriptedProvider::fixed("not json")),
        Arc::new(MemoryHistoryStore::new()),
    );

    let request = TurnRequest::new("s1", "x")
        .with_options(TurnOptions::default().with_schema(json!({"type": "object"})));
    let reply = orch.run_turn(request).await.unwrap();

    let text = reply.reply().unwrap();
    assert!(text.starts_with(&format!("{SCHEMA_MISMATCH_PREFIX}JSON parse error:")));
}

#[tokio::test]
async fn test_schema_match_keeps_reply() {
    let orch = orchestrator(
        router_with(ScriptedProvider::fixed(r#"{"name": "kenji"}"#)),
        Arc::new(MemoryHistoryStore::new()),
    );

    let schema = json!({"type": "object", "required": ["name"]});
    let request = TurnRequest::new("s1", "x").with_options(TurnOptions::default().with_schema(schema));
    let reply = orch.run_turn(request).await.unwrap();

    assert_eq!(reply.reply(), Some(r#"{"name": "kenji"}"#));
}

#[tokio::test]
async fn test_empty_schema_skips_validation() {
    let orch = orchestrator(
        router_with(ScriptedProvider::fixed("plain text")),
        Arc::new(MemoryHistoryStore::new()),
    );

    let request = TurnRequest::new("s1", "x").with_options(TurnOptions::default().with_schema(json!({})));
    assert_eq!(orch.run_turn(request).await.unwrap().reply(), Some("plain text"));
}

// ============================================================================
// Streaming turns
// ============================================================================

#[tokio::test]
async fn test_stream_concat_matches_persisted() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(
        router_with(ScriptedProvider::fixed("one two three")),
        history.clone(),
    );

    let rx = orch.stream_turn(TurnRequest::new("s1", "count")).unwrap();
    let events = collect_events(rx).await;

    assert!(matches!(events.last(), Some(Ok(StreamEvent::End))));
    assert_eq!(events.len(), 4);
    let text = chunk_text(&events);
    assert_eq!(text, "one two three");

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(transcript.last().unwrap(), &Message::assistant(text));
}

#[tokio::test]
async fn test_stream_echo_fallback() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(Arc::new(LlmRouter::default()), history.clone());

    let rx = orch.stream_turn(TurnRequest::new("s1", "hello there")).unwrap();
    let events = collect_events(rx).await;

    assert_eq!(chunk_text(&events), format!("{ECHO_PREFIX}hello there"));
    assert_eq!(history.load("s1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_stream_unknown_tool_continues() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(router_with(ScriptedProvider::fixed("reply")), history.clone());

    let request =
        TurnRequest::new("s1", "hi").with_options(TurnOptions::default().with_tool("nonexistent"));
    let events = collect_events(orch.stream_turn(request).unwrap()).await;

    assert!(matches!(&events[0], Ok(StreamEvent::Chunk(c)) if c == UNKNOWN_TOOL_CHUNK));
    assert!(matches!(events.last(), Some(Ok(StreamEvent::End))));

    let transcript = history.load("s1").await.unwrap();
    assert_eq!(
        transcript,
        vec![Message::user("hi"), Message::assistant("reply")]
    );
}

#[tokio::test]
async fn test_stream_fault_aborts_without_persisting() {
    let mut history = MockHistoryStore::new();
    history.expect_load().times(1).returning(|_| Ok(Vec::new()));
    history.expect_save().times(0);
    history
        .expect_storage_key()
        .returning(|session_id| session_id.to_string());
    let orch = orchestrator(router_with(Arc::new(BrokenStreamProvider)), Arc::new(history));

    let events = collect_events(orch.stream_turn(TurnRequest::new("s1", "hi")).unwrap()).await;

    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], Ok(StreamEvent::Chunk(c)) if c == "partial "));
    assert!(matches!(&events[1], Err(Error::Llm(_))));
}

// ============================================================================
// Session serialization
// ============================================================================

#[tokio::test]
async fn test_same_session_turns_serialized() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(
        router_with(ScriptedProvider::slow(Duration::from_millis(20))),
        history.clone(),
    );

    let (a, b) = tokio::join!(
        orch.run_turn(TurnRequest::new("shared", "first")),
        orch.run_turn(TurnRequest::new("shared", "second")),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(history.load("shared").await.unwrap().len(), 4);
    assert_eq!(orch.active_sessions(), 0);
}

#[tokio::test]
async fn test_ids_sharing_a_file_share_a_lock() {
    let dir = tempfile::tempdir().unwrap();
    let history = Arc::new(FileHistoryStore::new(dir.path()).unwrap());
    let orch = orchestrator(
        router_with(ScriptedProvider::slow(Duration::from_millis(20))),
        history.clone(),
    );

    let (a, b) = tokio::join!(
        orch.run_turn(TurnRequest::new("a/b", "first")),
        orch.run_turn(TurnRequest::new("a_b", "second")),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(history.load("a_b").await.unwrap().len(), 4);
    assert_eq!(orch.active_sessions(), 0);
}

#[tokio::test]
async fn test_unserialized_turns_can_lose_updates() {
    let history = Arc::new(MemoryHistoryStore::new());
    let orch = orchestrator(
        router_with(ScriptedProvider::slow(Duration::from_millis(20))),
        history.clone(),
    )
    .with_config(OrchestratorConfig::new().with_serialize_sessions(false));

    let (a, b) = tokio::join!(
        orch.run_turn(TurnRequest::new("shared", "first")),
        orch.run_turn(TurnRequest::new("shared", "second")),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(history.load("shared").await.unwrap().len(), 2);
    assert_eq!(orch.active_sessions(), 0);
}
