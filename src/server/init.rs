//! Server initialization
//!
//! Builds the services from configuration, assembles the axum router and
//! runs it until a shutdown signal arrives.

use super::config::{AppConfig, HistoryBackend, HistoryConfig, ServerConfig};
use super::loader::load_config;
use super::providers::resolve_llm_router;
use crate::api::{api_router, AppInfo};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::{routing::get, Extension, Router};
use samurai_core::{ChatOrchestrator, FileHistoryStore, HistoryStore, MemoryHistoryStore};
use samurai_tools::ToolRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Create the history store selected by configuration
pub fn build_history_store(config: &HistoryConfig) -> Result<Arc<dyn HistoryStore>> {
    match config.backend {
        HistoryBackend::File => {
            let store = FileHistoryStore::new(config.path.clone()).with_context(|| {
                format!("Failed to open history directory {}", config.path.display())
            })?;
            info!(path = %config.path.display(), "Using file history store");
            Ok(Arc::new(store))
        }
        HistoryBackend::Memory => {
            warn!("Using in-memory history store, transcripts are lost on restart");
            Ok(Arc::new(MemoryHistoryStore::new()))
        }
    }
}

/// Wire the orchestrator from configuration
pub fn build_orchestrator(config: &AppConfig) -> Result<ChatOrchestrator> {
    let llm = resolve_llm_router(&config.llm, &config.app_name);
    let tools = Arc::new(ToolRegistry::with_builtins());
    info!(tools = tools.len(), "Tool registry ready");
    let history = build_history_store(&config.history)?;

    Ok(ChatOrchestrator::new(llm, tools, history).with_config((&config.orchestrator).into()))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Assemble the HTTP application
pub fn build_app(config: &AppConfig, orchestrator: ChatOrchestrator) -> Router {
    let app_info = AppInfo::new(config.app_name.clone());
    let root_text = format!("{} chat gateway", config.app_name);

    let app = Router::new()
        .merge(api_router())
        .route("/", get(move || async move { root_text }));

    // Web UI static files
    let app = match config.server.web_dir.as_deref() {
        Some(dir) if dir.is_dir() => {
            info!("Web UI enabled: serving {} under /app", dir.display());
            app.nest_service("/app", ServeDir::new(dir).append_index_html_on_directories(true))
        }
        _ => app,
    };

    app.layer(Extension(orchestrator))
        .layer(Extension(app_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Run the HTTP server
pub async fn run() -> Result<()> {
    info!("Starting SAMURAI v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let orchestrator = build_orchestrator(&config)?;
    let app = build_app(&config, orchestrator);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("SAMURAI shutdown complete");
    Ok(())
}
