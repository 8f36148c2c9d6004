//! Format conversion tools

use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("H1 is a compile-time constant"));

static H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("H2 is a compile-time constant"));

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(.*?)```").expect("CODE_FENCE is a compile-time constant")
});

// ============================================================================
// convert.md_to_html
// ============================================================================

/// Minimal markdown to HTML: headings, fenced code, line breaks
pub struct MarkdownToHtmlTool {
    definition: ToolDefinition,
}

impl MarkdownToHtmlTool {
    /// Create a new markdown converter
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "convert.md_to_html",
                "Very small markdown-to-HTML converter for headings and code blocks",
            )
            .with_category(ToolCategory::Convert),
        }
    }
}

impl Default for MarkdownToHtmlTool {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn markdown_to_html(text: &str) -> String {
    let html = H1.replace_all(text, "<h1>${1}</h1>");
    let html = H2.replace_all(&html, "<h2>${1}</h2>");
    let html = CODE_FENCE.replace_all(&html, "<pre><code>${1}</code></pre>");
    html.replace('\n', "<br>")
}

#[async_trait::async_trait]
impl Tool for MarkdownToHtmlTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        Ok(json!({ "html": markdown_to_html(message) }))
    }
}

// ============================================================================
// convert.csv_to_json
// ============================================================================

/// CSV with a header row to an array of objects
pub struct CsvToJsonTool {
    definition: ToolDefinition,
}

impl CsvToJsonTool {
    /// Create a new CSV converter
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new("convert.csv_to_json", "Convert CSV text to JSON array")
                .with_category(ToolCategory::Convert),
        }
    }
}

impl Default for CsvToJsonTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows keyed by header; short rows get `null` for missing columns
pub(crate) fn csv_rows(text: &str) -> std::result::Result<Vec<Value>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let value = record.get(i).map_or(Value::Null, Value::from);
                (h.to_string(), value)
            })
            .collect();
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

#[async_trait::async_trait]
impl Tool for CsvToJsonTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        match csv_rows(message) {
            Ok(rows) => Ok(json!({ "rows": rows })),
            Err(e) => Ok(json!({ "error": e.to_string() })),
        }
    }
}

// ============================================================================
// json.validate
// ============================================================================

/// Parse the message as JSON
pub struct JsonValidateTool {
    definition: ToolDefinition,
}

impl JsonValidateTool {
    /// Create a new JSON validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "json.validate",
                "Validate JSON string and return parsed object or error",
            )
            .with_category(ToolCategory::Convert),
        }
    }
}

impl Default for JsonValidateTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for JsonValidateTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        Ok(match serde_json::from_str::<Value>(message) {
            Ok(object) => json!({ "valid": true, "object": object }),
            Err(e) => json!({ "valid": false, "error": e.to_string() }),
        })
    }
}
