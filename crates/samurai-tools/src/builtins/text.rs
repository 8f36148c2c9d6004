//! Text processing tools

use super::{int_field, invalid_json, parse_object, str_field};
use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition};
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

const DEFAULT_SUMMARY_SENTENCES: i64 = 3;
const DEFAULT_TOP_KEYWORDS: i64 = 10;
const MIN_KEYWORD_CHARS: usize = 3;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+").expect("SENTENCE_BREAK is a compile-time constant")
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("WORD is a compile-time constant"));

static NON_ALNUM_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9]+").expect("NON_ALNUM_RUN is a compile-time constant")
});

/// Split text into sentences after `.`, `!` or `?` followed by whitespace
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // punctuation is one byte
        sentences.push(&text[start..=m.start()]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

// ============================================================================
// text.search_replace
// ============================================================================

/// Regex find-and-replace over `{text, pattern, replace}`
pub struct SearchReplaceTool {
    definition: ToolDefinition,
}

impl SearchReplaceTool {
    /// Create a new search/replace tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "text.search_replace",
                "Find and replace pattern in text. Input JSON: {text, pattern, replace}",
            )
            .with_category(ToolCategory::Text),
        }
    }
}

impl Default for SearchReplaceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for SearchReplaceTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        let Some(obj) = parse_object(message) else {
            return Ok(invalid_json());
        };
        let pattern = match Regex::new(str_field(&obj, "pattern")) {
            Ok(re) => re,
            Err(e) => return Ok(json!({ "error": format!("bad pattern: {e}") })),
        };
        let result = pattern.replace_all(str_field(&obj, "text"), str_field(&obj, "replace"));
        Ok(json!({ "result": result }))
    }
}

// ============================================================================
// text.summarize
// ============================================================================

/// Naive summarizer returning the first N sentences
pub struct SummarizeTool {
    definition: ToolDefinition,
}

impl SummarizeTool {
    /// Create a new summarizer
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "text.summarize",
                "Naive summarizer: returns the first N sentences. Input JSON: {text, sentences}",
            )
            .with_category(ToolCategory::Text),
        }
    }
}

impl Default for SummarizeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for SummarizeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        let Some(obj) = parse_object(message) else {
            return Ok(invalid_json());
        };
        let Some(count) = int_field(&obj, "sentences", DEFAULT_SUMMARY_SENTENCES) else {
            return Ok(json!({ "error": "sentences must be an integer" }));
        };

        let sentences = split_sentences(str_field(&obj, "text"));
        let take = usize::try_from(count).unwrap_or(0);
        let summary = sentences
            .into_iter()
            .take(take)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(json!({ "summary": summary.trim() }))
    }
}

// ============================================================================
// text.keywords
// ============================================================================

/// Most frequent words longer than two characters
pub struct KeywordsTool {
    definition: ToolDefinition,
}

impl KeywordsTool {
    /// Create a new keyword extractor
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "text.keywords",
                "Extract frequent keywords (naive). Input JSON: {text, topN}",
            )
            .with_category(ToolCategory::Text),
        }
    }
}

impl Default for KeywordsTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Word counts ordered by descending frequency, ties in first-seen order
pub(crate) fn keyword_counts(text: &str) -> Vec<(String, u64)> {
    let lower = text.to_lowercase();
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for m in WORD.find_iter(&lower) {
        let w = m.as_str();
        if w.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        let count = counts.entry(w.to_string()).or_insert(0);
        if *count == 0 {
            order.push(w.to_string());
        }
        *count += 1;
    }

    let mut items: Vec<(String, u64)> = order
        .into_iter()
        .map(|w| {
            let c = counts.get(&w).copied().unwrap_or(0);
            (w, c)
        })
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

#[async_trait::async_trait]
impl Tool for KeywordsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        let Some(obj) = parse_object(message) else {
            return Ok(invalid_json());
        };
        let Some(top_n) = int_field(&obj, "topN", DEFAULT_TOP_KEYWORDS) else {
            return Ok(json!({ "error": "topN must be an integer" }));
        };

        let keywords: Vec<Value> = keyword_counts(str_field(&obj, "text"))
            .into_iter()
            .take(usize::try_from(top_n).unwrap_or(0))
            .map(|(word, count)| json!({ "word": word, "count": count }))
            .collect();
        Ok(json!({ "keywords": keywords }))
    }
}

// ============================================================================
// text.slugify
// ============================================================================

/// URL-safe slug of the message
pub struct SlugifyTool {
    definition: ToolDefinition,
}

impl SlugifyTool {
    /// Create a new slugify tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new("text.slugify", "Slugify a string into URL-safe format")
                .with_category(ToolCategory::Text),
        }
    }
}

impl Default for SlugifyTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace non-alphanumeric runs with `-`, trim dashes, lowercase
pub(crate) fn slugify(text: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(text, "-")
        .trim_matches('-')
        .to_lowercase()
}

#[async_trait::async_trait]
impl Tool for SlugifyTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        Ok(json!({ "slug": slugify(message) }))
    }
}
