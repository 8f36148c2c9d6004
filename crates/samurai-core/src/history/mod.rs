//! History - Per-session transcript persistence
//!
//! A session owns one ordered message sequence. Stores replace the whole
//! sequence on save; a session that was never saved loads as empty.
//!
//! - `FileHistoryStore`: one JSON file per session (default)
//! - `MemoryHistoryStore`: in-process map (development/testing)

mod file_store;
mod store;

pub use file_store::{sanitize_session_id, FileHistoryStore};
pub use store::{HistoryStore, MemoryHistoryStore};

#[cfg(test)]
pub use store::MockHistoryStore;
