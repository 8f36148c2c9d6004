//! Health check endpoint
//!
//! `/api/health` reports the app name and version for load balancers.

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use super::AppInfo;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: String,
    pub version: &'static str,
}

async fn health_check(Extension(info): Extension<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: info.name,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/api/health", get(health_check))
}
