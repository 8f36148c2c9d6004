//! Structured output validation
//!
//! Checks a model reply against a caller-supplied JSON Schema and renders
//! violations as a newline-joined `path: message` report ordered by path.

use jsonschema::paths::{JSONPointer, PathChunk};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Orderable path segment; array indices compare numerically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PathKey {
    Index(usize),
    Name(String),
}

fn path_key(pointer: &JSONPointer) -> Vec<PathKey> {
    pointer
        .iter()
        .map(|chunk| match chunk {
            PathChunk::Index(i) => PathKey::Index(*i),
            PathChunk::Property(name) => PathKey::Name(name.to_string()),
            PathChunk::Keyword(keyword) => PathKey::Name((*keyword).to_string()),
        })
        .collect()
}

/// Result of validating a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the reply conforms
    pub ok: bool,
    /// Human-readable report, empty when `ok`
    pub error_report: String,
}

impl ValidationOutcome {
    fn valid() -> Self {
        Self {
            ok: true,
            error_report: String::new(),
        }
    }

    fn invalid(report: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_report: report.into(),
        }
    }
}

/// Whether a schema option should trigger validation
///
/// `null` and the empty object mean "no schema".
#[must_use]
pub fn schema_requested(schema: Option<&Value>) -> bool {
    match schema {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

/// Validate `text` as JSON against `schema`
#[must_use]
pub fn validate_json_string(text: &str, schema: &Value) -> ValidationOutcome {
    let instance: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ValidationOutcome::invalid(format!("JSON parse error: {e}")),
    };

    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(e) => return ValidationOutcome::invalid(format!("schema error: {e}")),
    };

    let result = compiled.validate(&instance);
    let Err(errors) = result else {
        return ValidationOutcome::valid();
    };

    let mut entries: Vec<(Vec<PathKey>, Vec<String>, String)> = errors
        .map(|e| {
            let key = path_key(&e.instance_path);
            (key, e.instance_path.clone().into_vec(), e.to_string())
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let report = entries
        .into_iter()
        .map(|(_, path, message)| format!("{}: {}", path.join("/"), message))
        .collect::<Vec<_>>()
        .join("\n");
    ValidationOutcome::invalid(report)
}
