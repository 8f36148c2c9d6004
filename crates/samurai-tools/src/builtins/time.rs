//! Clock and identifier tools

use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition};
use chrono::Utc;
use serde_json::{json, Value};

/// Current UNIX time and ISO timestamp
pub struct TimeTool {
    definition: ToolDefinition,
}

impl TimeTool {
    /// Create a new time tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new("time.now", "Get current UNIX time and ISO timestamp")
                .with_category(ToolCategory::Time),
        }
    }
}

impl Default for TimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for TimeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, _message: &str, _session_id: &str) -> Result<Value> {
        let now = Utc::now();
        Ok(json!({
            "unix": now.timestamp(),
            "iso": now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }))
    }
}

/// Random UUID v4
pub struct UuidTool {
    definition: ToolDefinition,
}

impl UuidTool {
    /// Create a new UUID tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new("uuid.generate", "Generate a random UUID v4")
                .with_category(ToolCategory::Time),
        }
    }
}

impl Default for UuidTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for UuidTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, _message: &str, _session_id: &str) -> Result<Value> {
        Ok(json!({ "uuid": uuid::Uuid::new_v4().to_string() }))
    }
}
