//! History store trait and in-memory backend

use crate::error::Result;
use async_trait::async_trait;
use samurai_llm::Message;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Session history store trait for abstracting storage backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the transcript of a session (empty if none)
    async fn load(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Replace the transcript of a session
    async fn save(&self, session_id: &str, messages: &[Message]) -> Result<()>;

    /// Key under which a session is stored
    ///
    /// Ids that map to the same key share one transcript.
    fn storage_key(&self, session_id: &str) -> String {
        session_id.to_string()
    }
}

/// In-memory history store
///
/// Data is lost on restart.
#[derive(Clone, Default)]
pub struct MemoryHistoryStore {
    sessions: Arc<RwLock<HashMap<String, Vec<Message>>>>,
}

impl MemoryHistoryStore {
    /// Create a new memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Check if no session has been saved
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self, session_id: &str) -> Result<Vec<Message>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    async fn save(&self, session_id: &str, messages: &[Message]) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.to_string(), messages.to_vec());
        debug!(session_id = %session_id, messages = messages.len(), "Saved session history");
        Ok(())
    }
}
