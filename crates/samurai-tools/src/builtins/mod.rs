//! Builtins - Built-in tools for SAMURAI
//!
//! Every tool takes the raw user message of the turn. Tools that need
//! parameters read them from the message as a JSON object:
//! - Time: time.now, uuid.generate
//! - Text: text.search_replace, text.summarize, text.keywords, text.slugify
//! - Convert: convert.md_to_html, convert.csv_to_json, json.validate
//! - Security: random.number, security.password, encode.qr_base64
//! - Utility: shell.echo

mod convert;
mod echo;
mod generate;
mod text;
mod time;

pub use convert::{CsvToJsonTool, JsonValidateTool, MarkdownToHtmlTool};
pub use echo::ShellEchoTool;
pub use generate::{PasswordTool, QrBase64Tool, RandomNumberTool};
pub use text::{KeywordsTool, SearchReplaceTool, SlugifyTool, SummarizeTool};
pub use time::{TimeTool, UuidTool};

use crate::registry::ToolRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Register all built-in tools with the registry
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(TimeTool::new()));
    registry.register(Arc::new(UuidTool::new()));

    registry.register(Arc::new(SearchReplaceTool::new()));
    registry.register(Arc::new(SummarizeTool::new()));
    registry.register(Arc::new(KeywordsTool::new()));
    registry.register(Arc::new(SlugifyTool::new()));

    registry.register(Arc::new(MarkdownToHtmlTool::new()));
    registry.register(Arc::new(CsvToJsonTool::new()));
    registry.register(Arc::new(JsonValidateTool::new()));

    registry.register(Arc::new(RandomNumberTool::new()));
    registry.register(Arc::new(PasswordTool::new()));
    registry.register(Arc::new(QrBase64Tool::new()));

    registry.register(Arc::new(ShellEchoTool::new()));
}

// ============================================================================
// Input helpers
// ============================================================================

/// Parse the message as a JSON object
pub(crate) fn parse_object(message: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(message) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// `{"error": "Invalid JSON"}`
pub(crate) fn invalid_json() -> Value {
    serde_json::json!({ "error": "Invalid JSON" })
}

/// String field, empty when absent or not a string
pub(crate) fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Integer field with a default; numeric strings and floats are accepted
///
/// Returns `None` when the field is present but not a number.
pub(crate) fn int_field(obj: &Map<String, Value>, key: &str, default: i64) -> Option<i64> {
    match obj.get(key) {
        None | Some(Value::Null) => Some(default),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}
