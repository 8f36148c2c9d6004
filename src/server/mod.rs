//! Server module for SAMURAI
//!
//! Contains the main server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for all server components
//! - `loader`: Configuration loading from files and environment
//! - `providers`: LLM provider resolution and registration
//! - `init`: Service wiring and the HTTP run loop

pub mod config;
mod init;
mod loader;
mod providers;

// Re-export public API
pub use init::run;
pub use loader::load_config;
pub use providers::resolve_llm_router;
