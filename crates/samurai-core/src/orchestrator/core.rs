//! Orchestrator core structure
//!
//! Contains the `ChatOrchestrator` struct, its builder methods and the
//! per-session turn locks.

use super::config::OrchestratorConfig;
use crate::history::HistoryStore;
use dashmap::DashMap;
use samurai_llm::LlmRouter;
use samurai_tools::ToolRegistry;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

type SessionLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Composes the LLM router, tool registry and history store into chat turns
///
/// Cheap to clone; clones share every collaborator and the session locks.
#[derive(Clone)]
pub struct ChatOrchestrator {
    pub(crate) llm: Arc<LlmRouter>,
    pub(crate) tools: Arc<ToolRegistry>,
    pub(crate) history: Arc<dyn HistoryStore>,
    pub(crate) config: OrchestratorConfig,
    session_locks: SessionLocks,
}

impl ChatOrchestrator {
    /// Create a new orchestrator
    #[must_use]
    pub fn new(
        llm: Arc<LlmRouter>,
        tools: Arc<ToolRegistry>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            llm,
            tools,
            history,
            config: OrchestratorConfig::default(),
            session_locks: Arc::new(DashMap::new()),
        }
    }

    /// Set the configuration
    #[must_use]
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// LLM router
    #[must_use]
    pub fn llm(&self) -> &Arc<LlmRouter> {
        &self.llm
    }

    /// Tool registry
    #[must_use]
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// History store
    #[must_use]
    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Sessions with a turn in flight or waiting
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.session_locks.len()
    }

    /// Wait for exclusive use of a session, held until the guard drops
    ///
    /// Locks are keyed by the history store's storage key, so ids that
    /// share a transcript also share a lock.
    pub(crate) async fn lock_session(&self, session_id: &str) -> Option<SessionTurnGuard> {
        if !self.config.serialize_sessions {
            return None;
        }

        let key = self.history.storage_key(session_id);
        let lock = self.session_locks.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        debug!(session_id = %session_id, key = %key, "Acquired session turn lock");

        Some(SessionTurnGuard {
            guard: Some(guard),
            locks: Arc::clone(&self.session_locks),
            key,
        })
    }
}

/// Releases a session lock and forgets it once nobody else is waiting
pub(crate) struct SessionTurnGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: SessionLocks,
    key: String,
}

impl Drop for SessionTurnGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
