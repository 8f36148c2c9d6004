//! Orchestrator - Chat turn protocols
//!
//! This module turns a user message into an assistant reply: it loads the
//! session transcript, optionally runs a tool, dispatches to the LLM router
//! (single call or debate), optionally validates the reply against a JSON
//! Schema and persists the grown transcript.
//!
//! # Module Structure
//!
//! - `config`: Request, response and configuration types
//! - `core`: ChatOrchestrator struct, builder and session locks
//! - `process`: Synchronous turn
//! - `debate`: Two-expert debate with synthesis
//! - `stream`: Streaming turn over an mpsc channel

mod config;
mod core;
mod debate;
mod process;
mod stream;

#[cfg(test)]
mod tests;

pub use config::{
    OrchestratorConfig, TurnOptions, TurnRequest, TurnResponse, DEFAULT_SESSION_ID,
    SCHEMA_MISMATCH_PREFIX,
};
pub use core::ChatOrchestrator;
pub use debate::{EXPERT_A_PROMPT, EXPERT_B_PROMPT, SYNTHESIS_PROMPT};
pub use stream::{StreamEvent, UNKNOWN_TOOL_CHUNK};
