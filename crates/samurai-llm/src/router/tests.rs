//! Tests for router module

use super::*;
use crate::error::{Error, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provider stub that either fails or answers with a fixed text, counting calls
struct StubProvider {
    id: &'static str,
    reply: Option<&'static str>,
    calls: AtomicUsize,
    seen_models: Mutex<Vec<String>>,
}

impl StubProvider {
    fn ok(id: &'static str, reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            reply: Some(reply),
            calls: AtomicUsize::new(0),
            seen_models: Mutex::new(Vec::new()),
        })
    }

    fn failing(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            reply: None,
            calls: AtomicUsize::new(0),
            seen_models: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, request: &CompletionRequest) -> Result<&'static str> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_models.lock().unwrap().push(request.model.clone());
        self.reply
            .ok_or_else(|| Error::Api(format!("{} is down", self.id)))
    }
}

#[async_trait::async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        self.id
    }

    fn default_model(&self) -> &str {
        "stub-default"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let reply = self.record(&request)?;
        Ok(CompletionResponse::new(reply, self.id, request.model))
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<ChunkStream> {
        let reply = self.record(&request)?;
        Ok(stream::iter(vec![Ok(reply.to_string())]).boxed())
    }
}

#[test]
fn test_router_empty() {
    let router = LlmRouter::new(["openai", "ollama"]);
    assert_eq!(router.priority(), ["openai", "ollama"]);
    assert!(!router.has_provider("openai"));
    assert!(router.list_providers().is_empty());
    assert!(router.registrations().is_empty());
}

#[test]
fn test_registrations_follow_priority() {
    let mut router = LlmRouter::new(["a", "missing", "b"]);
    router.register("b", StubProvider::ok("b", "B"));
    router.register("a", StubProvider::ok("a", "A"));
    router.register("unlisted", StubProvider::ok("unlisted", "U"));

    assert_eq!(router.list_providers(), vec!["a", "b"]);
    let regs = router.registrations();
    assert_eq!(regs.len(), 2);
    assert_eq!(regs[0].id, "a");
    assert_eq!(regs[0].priority_rank, 0);
    assert_eq!(regs[1].id, "b");
    assert_eq!(regs[1].priority_rank, 2);
    assert_eq!(regs[1].default_model, "stub-default");
}

#[test]
fn test_duplicate_registration_overwrites() {
    let mut router = LlmRouter::new(["a"]);
    router.register("a", StubProvider::ok("first", "1"));
    router.register("a", StubProvider::ok("second", "2"));
    assert_eq!(router.get("a").unwrap().name(), "second");
}

#[tokio::test]
async fn test_first_success_wins_after_failures() {
    let p1 = StubProvider::failing("p1");
    let p2 = StubProvider::failing("p2");
    let p3 = StubProvider::ok("p3", "third time lucky");
    let p4 = StubProvider::ok("p4", "never reached");

    let mut router = LlmRouter::new(["p1", "p2", "p3", "p4"]);
    router.register("p1", p1.clone());
    router.register("p2", p2.clone());
    router.register("p3", p3.clone());
    router.register("p4", p4.clone());

    let response = router.complete(&[Message::user("hi")], None).await;
    assert_eq!(response.content, "third time lucky");
    assert_eq!(response.provider, "p3");
    assert_eq!(p1.calls(), 1);
    assert_eq!(p2.calls(), 1);
    assert_eq!(p3.calls(), 1);
    assert_eq!(p4.calls(), 0);
}

#[tokio::test]
async fn test_model_hint_overrides_default() {
    let p = StubProvider::ok("p", "ok");
    let mut router = LlmRouter::new(["p"]);
    router.register("p", p.clone());

    router.complete(&[Message::user("hi")], None).await;
    router.complete(&[Message::user("hi")], Some("custom")).await;

    let seen = p.seen_models.lock().unwrap().clone();
    assert_eq!(seen, vec!["stub-default", "custom"]);
}

#[tokio::test]
async fn test_no_providers_falls_back_to_echo() {
    let router = LlmRouter::new(["openai", "ollama"]);
    let response = router.complete(&[Message::user("ping")], None).await;
    assert_eq!(response.content, "[SAMURAI-MOCK] You said: ping");
    assert_eq!(response.provider, "mock");
    assert_eq!(response.model, "mock");
}

#[tokio::test]
async fn test_all_failing_falls_back_to_echo() {
    let mut router = LlmRouter::new(["p1"]);
    router.register("p1", StubProvider::failing("p1"));
    let response = router.complete(&[Message::user("x")], Some("gpt")).await;
    assert!(response.content.starts_with(ECHO_PREFIX));
    assert_eq!(response.provider, ECHO_ID);
    assert_eq!(response.model, ECHO_ID);
}

#[tokio::test]
async fn test_fallback_ignores_model_hint() {
    let router = LlmRouter::default();
    let response = router.complete(&[Message::user("x")], Some("gpt-4o")).await;
    assert_eq!(response.model, ECHO_ID);

    let chunks: Vec<String> = router
        .complete_stream(&[Message::user("x")], Some("gpt-4o"))
        .await
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.concat(), format!("{ECHO_PREFIX}x"));
}

#[tokio::test]
async fn test_stream_skips_failing_provider() {
    let bad = StubProvider::failing("bad");
    let good = StubProvider::ok("good", "streamed");
    let mut router = LlmRouter::new(["bad", "good"]);
    router.register("bad", bad.clone());
    router.register("good", good.clone());

    let chunks: Vec<String> = router
        .complete_stream(&[Message::user("hi")], None)
        .await
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks, vec!["streamed"]);
    assert_eq!(bad.calls(), 1);
}

#[tokio::test]
async fn test_echo_stream_chunks() {
    let router = LlmRouter::default();
    let chunks: Vec<String> = router
        .complete_stream(&[Message::user("hello world")], None)
        .await
        .try_collect()
        .await
        .unwrap();

    assert!(chunks.iter().all(|c| c.chars().count() <= ECHO_CHUNK_CHARS));
    assert_eq!(chunks[0], "[SAMURAI");
    assert_eq!(chunks.concat(), "[SAMURAI-MOCK] You said: hello world");
}

#[test]
fn test_echo_without_messages() {
    assert_eq!(EchoProvider::reply_for(&[]), ECHO_PREFIX);
}
