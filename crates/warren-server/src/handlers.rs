//! REST API handlers for the Warren server

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use warren_core::{Forest, LayoutParams, PageRecord, Persistence, StoreError, layout};

use crate::ServerState;

/// One page as the API presents it.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub title: String,
    pub url: String,
    pub visited_at: String,
    /// False when the page was recorded without an address; the frontend
    /// must then omit the link affordance.
    pub has_url: bool,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

/// Response structure for the page listing
#[derive(Debug, Serialize)]
pub struct PageListResponse {
    pub pages: Vec<PageResponse>,
}

/// Mutation request from the input frontend.
#[derive(Debug, Deserialize)]
pub struct AddPageRequest {
    pub title: String,
    pub parent: Option<String>,
    pub url: Option<String>,
}

/// Typed failure surfaced to the frontend unmodified.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

/// One positioned node of the layout.
#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub url: String,
    pub visited_at: String,
    pub has_url: bool,
}

/// One drawable parent→child segment.
#[derive(Debug, Serialize)]
pub struct EdgeResponse {
    pub parent: String,
    pub child: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// The full render contract: positions plus resolved edges.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    /// True when there is nothing to draw yet; the frontend renders its
    /// neutral state instead of an empty plot.
    pub empty: bool,
    pub nodes: Vec<NodeResponse>,
    pub edges: Vec<EdgeResponse>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

fn page_response(state_parent: Option<&str>, record: &PageRecord) -> PageResponse {
    PageResponse {
        title: record.title.clone(),
        url: record.url.clone(),
        visited_at: record.visited_at.to_rfc3339(),
        has_url: record.has_url(),
        parent: state_parent.map(str::to_string),
        children: record.children.clone(),
    }
}

fn error_response(err: &StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        StoreError::EmptyTitle | StoreError::SelfParent(_) => StatusCode::BAD_REQUEST,
        StoreError::UnknownParent(_) | StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::CycleDetected { .. } | StoreError::ParentConflict { .. } => {
            StatusCode::CONFLICT
        }
    };
    let body = ErrorResponse {
        kind: err.kind().to_string(),
        message: err.to_string(),
    };
    (status, Json(body))
}

/// List all pages in insertion order.
pub async fn list_pages(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let pages = store
        .pages()
        .map(|record| page_response(store.parent_of(&record.title), record))
        .collect();
    Json(PageListResponse { pages })
}

/// Detail panel data for one page.
pub async fn get_page(
    State(state): State<Arc<ServerState>>,
    Path(title): Path<String>,
) -> Result<Json<PageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.read().await;
    let record = store.get_page(&title).map_err(|e| error_response(&e))?;
    Ok(Json(page_response(store.parent_of(&title), record)))
}

/// Record a page and persist the updated snapshot.
pub async fn add_page(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<AddPageRequest>,
) -> Result<(StatusCode, Json<PageResponse>), (StatusCode, Json<ErrorResponse>)> {
    let mut store = state.store.write().await;
    store
        .add_page(&req.title, req.parent.as_deref(), req.url.as_deref())
        .map_err(|e| error_response(&e))?;

    if let Err(e) = state.persistence.save(&store.snapshot()) {
        // The accepted page stays in memory for retry
        tracing::warn!("failed to persist history: {e:#}");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                kind: "SaveFailed".to_string(),
                message: e.to_string(),
            }),
        ));
    }

    let record = store.get_page(&req.title).map_err(|e| error_response(&e))?;
    Ok((
        StatusCode::CREATED,
        Json(page_response(store.parent_of(&req.title), record)),
    ))
}

/// Compute and return the current layout.
pub async fn get_layout(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let forest = Forest::build(&store);
    let result = layout(&forest, &LayoutParams::default());

    let mut nodes = Vec::with_capacity(result.positions.len());
    for record in store.pages() {
        if let Some(point) = result.positions.get(&record.title) {
            nodes.push(NodeResponse {
                title: record.title.clone(),
                x: point.x,
                y: point.y,
                url: record.url.clone(),
                visited_at: record.visited_at.to_rfc3339(),
                has_url: record.has_url(),
            });
        }
    }

    let edges = result
        .edges
        .iter()
        .map(|edge| EdgeResponse {
            parent: edge.parent.clone(),
            child: edge.child.clone(),
            x1: edge.from.x,
            y1: edge.from.y,
            x2: edge.to.x,
            y2: edge.to.y,
        })
        .collect();

    Json(LayoutResponse {
        empty: result.is_empty(),
        nodes,
        edges,
    })
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
