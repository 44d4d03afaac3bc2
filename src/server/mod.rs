//! HTTP API and web front end
//!
//! Routes:
//! - `GET /get_courses?keyword=...` answers a keyword query as `{"results": ...}`
//! - `GET /` serves the search page
//! - `GET /health` liveness check

mod handlers;

pub use handlers::{CoursesResponse, KeywordParams};

use crate::query::CourseSearch;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub search: CourseSearch,
}

impl AppState {
    pub fn new(search: CourseSearch) -> Self {
        Self { search }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::ui))
        .route("/get_courses", get(handlers::get_courses))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on `bind` until Ctrl-C is received
///
/// # Arguments
///
/// * `bind` - Socket address to listen on
/// * `state` - Query collaborators shared by the handlers
///
/// # Returns
///
/// * `Ok(())` - Server shut down cleanly
/// * `Err(std::io::Error)` - Failed to bind or serve
pub async fn serve(bind: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
