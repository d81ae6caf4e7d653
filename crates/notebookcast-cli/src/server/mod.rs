pub mod api;

use anyhow::{Context, Result};
use api::{AppState, create_router};
use notebookcast::Pipeline;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Serve `pipeline` until the process is stopped.
///
/// Requests are accepted concurrently; the pipeline itself runs them one at
/// a time.
pub async fn serve(config: ServerConfig, pipeline: Pipeline) -> Result<()> {
    log::info!("Initializing notebookcast HTTP server");
    log::debug!("Server configuration: {:?}", config);

    let state = Arc::new(AppState {
        pipeline: Arc::new(pipeline),
    });
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    log::info!("Starting HTTP server on {}", addr);
    log::info!("Available endpoints:");
    log::info!("  - GET  http://{}/health", addr);
    log::info!("  - POST http://{}/api/v1/generate_podcast", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    log::info!("Server started successfully!");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
