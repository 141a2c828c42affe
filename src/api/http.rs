//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::rest::{admin, entries, query};
use super::state::AppState;
use crate::error::QaResult;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/query", get(query::query_answer))
        .route(
            "/api/entries",
            get(entries::list_entries).post(entries::create_entry),
        )
        .route(
            "/api/entries/:id",
            get(entries::get_entry)
                .patch(entries::patch_entry)
                .delete(entries::delete_entry),
        )
        .route("/api/entries/:id/aliases", post(entries::add_alias))
        .route("/api/entries/:id/feedback", post(entries::record_feedback))
        .route("/api/import", post(admin::import_entries))
        .route("/api/categories", get(admin::list_categories))
        .route("/api/stats", get(admin::get_stats))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl+C, then flush query statistics
pub async fn serve(addr: &str, state: Arc<AppState>) -> QaResult<()> {
    let kb = Arc::clone(&state.kb);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("REST API stopped");
    kb.flush_stats()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
