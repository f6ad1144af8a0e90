//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::client::SteamClient;
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, ClearCacheResponse, HealthResponse, ToolCallRequest, ToolCallResponse,
    ToolListResponse,
};
use crate::tools::ToolRegistry;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared Steam client
    pub client: Arc<SteamClient>,
    /// Registered tools
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// Creates a new AppState from a client and a tool registry.
    pub fn new(client: SteamClient, tools: ToolRegistry) -> Self {
        Self {
            client: Arc::new(client),
            tools: Arc::new(tools),
        }
    }

    /// Creates a new AppState with every built-in tool registered.
    pub fn with_builtin_tools(client: SteamClient) -> Self {
        Self::new(client, ToolRegistry::with_builtin_tools())
    }
}

/// Handler for GET /tools
pub async fn list_tools_handler(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(state.tools.list().into_iter().collect())
}

/// Handler for POST /tools/:name
///
/// Unknown tools and invalid arguments fail with an HTTP error; upstream
/// failures come back as text with `is_error` set.
pub async fn call_tool_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ToolCallRequest>,
) -> Result<Json<ToolCallResponse>> {
    let output = state.tools.call(&state.client, &name, &req.arguments).await?;
    Ok(Json(ToolCallResponse::new(name, output)))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.client.cache_stats().await))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.client.clear_cache().await;
    Json(ClearCacheResponse { cleared })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
