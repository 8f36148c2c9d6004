//! Echo tool

use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition};
use serde_json::{json, Value};

/// Echo back the message; a safe stand-in for shell access
pub struct ShellEchoTool {
    definition: ToolDefinition,
}

impl ShellEchoTool {
    /// Create a new echo tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "shell.echo",
                "Echo back the input message (safe shell placeholder)",
            )
            .with_category(ToolCategory::Utility),
        }
    }
}

impl Default for ShellEchoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for ShellEchoTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        Ok(json!({ "echo": message }))
    }
}
