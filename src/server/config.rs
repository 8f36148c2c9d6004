//! Server configuration types
//!
//! Contains all configuration structures for the SAMURAI server.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorAppConfig,
}

fn default_app_name() -> String {
    "SAMURAI".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            history: HistoryConfig::default(),
            orchestrator: OrchestratorAppConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any
    #[serde(default = "default_cors_origins")]
    pub cors_allow_origins: Vec<String>,
    /// Static web UI directory, served under `/app` when present
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allow_origins: default_cors_origins(),
            web_dir: None,
        }
    }
}

impl ServerConfig {
    /// Whether any origin may call the API
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_allow_origins.is_empty() || self.cors_allow_origins.iter().any(|o| o == "*")
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider ids in try order
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
    #[serde(default = "ProviderEndpointConfig::openai")]
    pub openai: ProviderEndpointConfig,
    #[serde(default = "ProviderEndpointConfig::openrouter")]
    pub openrouter: ProviderEndpointConfig,
    #[serde(default = "ProviderEndpointConfig::ollama")]
    pub ollama: ProviderEndpointConfig,
    #[serde(default = "ProviderEndpointConfig::hf")]
    pub hf: ProviderEndpointConfig,
}

fn default_priority() -> Vec<String> {
    ["openai", "openrouter", "ollama", "hf", "mock"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            openai: ProviderEndpointConfig::openai(),
            openrouter: ProviderEndpointConfig::openrouter(),
            ollama: ProviderEndpointConfig::ollama(),
            hf: ProviderEndpointConfig::hf(),
        }
    }
}

/// Per-provider endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpointConfig {
    pub default_model: String,
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl ProviderEndpointConfig {
    fn new(default_model: &str, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            default_model: default_model.to_string(),
            base_url: base_url.to_string(),
            timeout_secs,
        }
    }

    fn openai() -> Self {
        use samurai_llm::providers::openai;
        Self::new(openai::DEFAULT_MODEL, openai::BASE_URL, 60)
    }

    fn openrouter() -> Self {
        use samurai_llm::providers::openrouter;
        Self::new(openrouter::DEFAULT_MODEL, openrouter::BASE_URL, 60)
    }

    fn ollama() -> Self {
        use samurai_llm::providers::ollama;
        Self::new(ollama::DEFAULT_MODEL, ollama::DEFAULT_BASE_URL, 120)
    }

    fn hf() -> Self {
        use samurai_llm::providers::huggingface;
        Self::new(huggingface::DEFAULT_MODEL, huggingface::BASE_URL, 60)
    }
}

/// History backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// One JSON file per session
    #[default]
    File,
    /// In-process map, lost on restart
    Memory,
}

/// History configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub backend: HistoryBackend,
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("samurai_data/memory")
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::default(),
            path: default_history_path(),
        }
    }
}

/// Orchestrator configuration (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorAppConfig {
    /// Serialize turns that target the same session
    #[serde(default = "default_true")]
    pub serialize_sessions: bool,
    /// Chunk buffer between a streaming turn and its HTTP response
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
}

fn default_true() -> bool {
    true
}

fn default_stream_buffer() -> usize {
    32
}

impl Default for OrchestratorAppConfig {
    fn default() -> Self {
        Self {
            serialize_sessions: true,
            stream_buffer: default_stream_buffer(),
        }
    }
}

impl From<&OrchestratorAppConfig> for samurai_core::OrchestratorConfig {
    fn from(config: &OrchestratorAppConfig) -> Self {
        samurai_core::OrchestratorConfig::new()
            .with_serialize_sessions(config.serialize_sessions)
            .with_stream_buffer(config.stream_buffer)
    }
}
