//! Web API module for SAMURAI
//!
//! Provides REST API endpoints for:
//! - Health checks
//! - Tool listing
//! - Chat turns (JSON and server-sent events)

pub mod chat;
pub mod error;
pub mod health;
pub mod tools;

use axum::Router;

pub use chat::chat_routes;
pub use health::health_routes;
pub use tools::tools_routes;

/// Application identity reported by the health endpoint
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
}

impl AppInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Create the API router with all endpoints
///
/// Handlers expect `Extension<ChatOrchestrator>` and `Extension<AppInfo>`
/// layers.
pub fn api_router() -> Router {
    Router::new()
        .merge(health_routes())
        .merge(tools_routes())
        .merge(chat_routes())
}
