//! SAMURAI Tools - Tool Registry and Built-in Tools
//!
//! This crate provides the tool system for the SAMURAI gateway:
//! - Registry: Tool registration and lookup by name
//! - Builtins: Small self-contained tools (time, text, conversion, generators)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod registry;

pub use builtins::register_builtins;
pub use error::{Error, Result};
pub use registry::{Tool, ToolCategory, ToolDefinition, ToolRegistry};
