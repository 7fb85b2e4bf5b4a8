//! HTTP server exposing the page store and its layout as a JSON API
//!
//! The frontend that actually draws the forest stays outside this crate;
//! it talks to these routes for mutations, detail panels, and coordinates.

pub mod router;
pub mod handlers;

use std::sync::Arc;

use tokio::sync::RwLock;
use warren_core::{PageStore, Persistence};

/// Bind address for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Shared state: the one store for this session, plus the snapshot backend.
///
/// Each request runs its mutation or render to completion under the lock,
/// which keeps the single-user request/response model of the core.
pub struct ServerState {
    pub store: RwLock<PageStore>,
    pub persistence: Box<dyn Persistence>,
}

impl ServerState {
    pub fn new(store: PageStore, persistence: Box<dyn Persistence>) -> Self {
        ServerState {
            store: RwLock::new(store),
            persistence,
        }
    }
}

/// The Warren HTTP server.
pub struct WarrenServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl WarrenServer {
    pub fn new(store: PageStore, persistence: Box<dyn Persistence>, config: ServerConfig) -> Self {
        WarrenServer {
            state: Arc::new(ServerState::new(store, persistence)),
            config,
        }
    }

    /// Handle on the shared state, for callers that wire up background work.
    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let router = router::create_router(self.state);
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Warren server listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router).await?;
        Ok(())
    }
}
