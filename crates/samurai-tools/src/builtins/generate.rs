//! Random generators and encoders

use super::{int_field, parse_object};
use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition};
use base64::Engine;
use rand::Rng;
use serde_json::{json, Value};

const DEFAULT_MIN: i64 = 0;
const DEFAULT_MAX: i64 = 100;
const DEFAULT_PASSWORD_LENGTH: i64 = 16;
const MAX_PASSWORD_LENGTH: i64 = 1024;
const PASSWORD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

// ============================================================================
// random.number
// ============================================================================

/// Random integer in `[min, max]`
pub struct RandomNumberTool {
    definition: ToolDefinition,
}

impl RandomNumberTool {
    /// Create a new random number tool
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "random.number",
                "Generate random integer. Input JSON: {min, max}",
            )
            .with_category(ToolCategory::Security),
        }
    }
}

impl Default for RandomNumberTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-JSON input falls back to the default range
pub(crate) fn random_number(message: &str) -> Value {
    let obj = parse_object(message).unwrap_or_default();
    let (Some(lo), Some(hi)) = (
        int_field(&obj, "min", DEFAULT_MIN),
        int_field(&obj, "max", DEFAULT_MAX),
    ) else {
        return json!({ "error": "min and max must be integers" });
    };
    if lo > hi {
        return json!({ "error": "min must not be greater than max" });
    }
    json!({ "number": rand::thread_rng().gen_range(lo..=hi) })
}

#[async_trait::async_trait]
impl Tool for RandomNumberTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        Ok(random_number(message))
    }
}

// ============================================================================
// security.password
// ============================================================================

/// Random password from letters, digits and symbols
pub struct PasswordTool {
    definition: ToolDefinition,
}

impl PasswordTool {
    /// Create a new password generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "security.password",
                "Generate a random password. Input JSON: {length}",
            )
            .with_category(ToolCategory::Security),
        }
    }
}

impl Default for PasswordTool {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}

#[async_trait::async_trait]
impl Tool for PasswordTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        let obj = parse_object(message).unwrap_or_default();
        let Some(length) = int_field(&obj, "length", DEFAULT_PASSWORD_LENGTH) else {
            return Ok(json!({ "error": "length must be an integer" }));
        };
        if length > MAX_PASSWORD_LENGTH {
            return Ok(json!({
                "error": format!("length must not exceed {MAX_PASSWORD_LENGTH}")
            }));
        }
        let password = generate_password(usize::try_from(length).unwrap_or(0));
        Ok(json!({ "password": password }))
    }
}

// ============================================================================
// encode.qr_base64
// ============================================================================

/// Base64 payload for a QR encoder
pub struct QrBase64Tool {
    definition: ToolDefinition,
}

impl QrBase64Tool {
    /// Create a new encoder
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "encode.qr_base64",
                "Return base64 placeholder for QR encoding (no external deps)",
            )
            .with_category(ToolCategory::Security),
        }
    }
}

impl Default for QrBase64Tool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for QrBase64Tool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, message: &str, _session_id: &str) -> Result<Value> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(message.as_bytes());
        Ok(json!({ "qr_base64": encoded }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_number_range() {
        for _ in 0..50 {
            let n = random_number(r#"{"min": 5, "max": 7}"#)["number"]
                .as_i64()
                .unwrap();
            assert!((5..=7).contains(&n));
        }
        assert_eq!(random_number(r#"{"min": 3, "max": 3}"#)["number"], 3);
    }

    #[test]
    fn test_random_number_defaults_and_errors() {
        let n = random_number("not json")["number"].as_i64().unwrap();
        assert!((0..=100).contains(&n));

        assert!(random_number(r#"{"min": 9, "max": 1}"#)["error"].is_string());
        assert!(random_number(r#"{"min": "x"}"#)["error"].is_string());
    }

    #[tokio::test]
    async fn test_password() {
        let tool = PasswordTool::new();
        let out = tool.invoke("", "s").await.unwrap();
        let pwd = out["password"].as_str().unwrap();
        assert_eq!(pwd.len(), 16);
        assert!(pwd.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));

        let out = tool.invoke(r#"{"length": 40}"#, "s").await.unwrap();
        assert_eq!(out["password"].as_str().unwrap().len(), 40);

        let out = tool.invoke(r#"{"length": -1}"#, "s").await.unwrap();
        assert_eq!(out["password"], "");
    }

    #[tokio::test]
    async fn test_password_length_is_capped() {
        let tool = PasswordTool::new();
        let out = tool.invoke(r#"{"length": 1024}"#, "s").await.unwrap();
        assert_eq!(out["password"].as_str().unwrap().len(), 1024);

        for input in [r#"{"length": 1025}"#, r#"{"length": 1e18}"#] {
            let out = tool.invoke(input, "s").await.unwrap();
            assert_eq!(out, json!({"error": "length must not exceed 1024"}));
        }
    }

    #[tokio::test]
    async fn test_qr_base64() {
        let out = QrBase64Tool::new().invoke("hello", "s").await.unwrap();
        assert_eq!(out, json!({"qr_base64": "aGVsbG8="}));
    }
}
