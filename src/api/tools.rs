//! Tools API endpoints
//!
//! GET /api/tools - List all registered tools

use axum::{extract::Extension, routing::get, Json, Router};
use samurai_core::ChatOrchestrator;
use serde::Serialize;

/// Tool information for API response
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Tool name (identifier)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Tool list response
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolInfo>,
}

/// List all registered tools, sorted by name
async fn list_tools(Extension(orchestrator): Extension<ChatOrchestrator>) -> Json<ToolsResponse> {
    let tools = orchestrator
        .tools()
        .list_definitions()
        .into_iter()
        .map(|def| ToolInfo {
            name: def.name.clone(),
            description: def.description.clone(),
        })
        .collect();

    Json(ToolsResponse { tools })
}

/// Create tools routes
pub fn tools_routes() -> Router {
    Router::new().route("/api/tools", get(list_tools))
}
