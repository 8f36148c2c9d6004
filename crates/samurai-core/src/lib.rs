//! SAMURAI Core - Chat orchestration engine
//!
//! This crate ties the LLM router, the tool registry and session history
//! together into the chat turn protocols:
//! - Orchestrator: sync turns, streaming turns, debate synthesis
//! - History: per-session transcript persistence
//! - Structured: JSON Schema validation of model replies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod history;
pub mod orchestrator;
pub mod structured;

pub use error::{Error, Result};
pub use history::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
pub use orchestrator::{
    ChatOrchestrator, OrchestratorConfig, StreamEvent, TurnOptions, TurnRequest, TurnResponse,
};
pub use structured::{validate_json_string, ValidationOutcome};
