//! Axum router setup for the Warren server

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    ServerState,
    handlers::{add_page, get_layout, get_page, health_check, list_pages},
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Mutations and listings for the input frontend
        .route("/api/pages", get(list_pages).post(add_page))
        .route("/api/pages/:title", get(get_page))
        // Coordinates and edges for the rendering frontend
        .route("/api/layout", get(get_layout))
        .route("/api/health", get(health_check))
        // Add CORS support
        .layer(CorsLayer::permissive())
        // Add state
        .with_state(state)
}
