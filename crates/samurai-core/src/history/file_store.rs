//! JSON file history backend
//!
//! Each session is stored as a pretty-printed JSON array at
//! `<root>/<session>.json`. Each write goes to its own temporary file and
//! is renamed into place.

use super::store::HistoryStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use samurai_llm::Message;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Map a session id to a safe file stem
///
/// Characters outside `[A-Za-z0-9_-]` become `_`, so ids cannot escape the
/// store directory. Distinct ids may map to the same stem.
#[must_use]
pub fn sanitize_session_id(session_id: &str) -> String {
    let stem: String = session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "default".to_string()
    } else {
        stem
    }
}

/// File-backed history store
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    root: PathBuf,
}

impl FileHistoryStore {
    /// Create a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            Error::History(format!("failed to create {}: {e}", root.display()))
        })?;
        info!(path = %root.display(), "Initializing file history store");
        Ok(Self { root })
    }

    /// Store directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds a session's transcript
    #[must_use]
    pub fn path_for(&self, session_id: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", sanitize_session_id(session_id)))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self, session_id: &str) -> Result<Vec<Message>> {
        let path = self.path_for(session_id);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::History(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(serde_json::from_str(&data)?)
    }

    async fn save(&self, session_id: &str, messages: &[Message]) -> Result<()> {
        let path = self.path_for(session_id);
        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        let data = serde_json::to_string_pretty(messages)?;

        tokio::fs::write(&tmp, data)
            .await
            .map_err(|e| Error::History(format!("failed to write {}: {e}", tmp.display())))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(Error::History(format!(
                "failed to replace {}: {e}",
                path.display()
            )));
        }

        debug!(session_id = %session_id, messages = messages.len(), "Saved session history");
        Ok(())
    }

    fn storage_key(&self, session_id: &str) -> String {
        sanitize_session_id(session_id)
    }
}
