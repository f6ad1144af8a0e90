//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::tools::{ToolDescriptor, ToolOutput, ToolParam};

/// Response body for a tool call (POST /tools/:name)
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResponse {
    /// Name of the tool that ran
    pub tool: String,
    /// Plain-text result
    pub content: String,
    /// True when the text describes an upstream failure
    pub is_error: bool,
}

impl ToolCallResponse {
    pub fn new(tool: impl Into<String>, output: ToolOutput) -> Self {
        Self {
            tool: tool.into(),
            content: output.content,
            is_error: output.is_error,
        }
    }
}

/// One entry in the tool listing
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub params: Vec<ToolParam>,
}

impl From<&ToolDescriptor> for ToolSummary {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            params: descriptor.params.clone(),
        }
    }
}

/// Response body for the tool listing (GET /tools)
#[derive(Debug, Clone, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolSummary>,
}

impl<'a> FromIterator<&'a ToolDescriptor> for ToolListResponse {
    fn from_iter<I: IntoIterator<Item = &'a ToolDescriptor>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().map(ToolSummary::from).collect(),
        }
    }
}

/// Response body for the cache stats endpoint (GET /cache/stats)
///
/// Counters are zero when caching is disabled.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub enabled: bool,
    /// Current number of entries
    pub size: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Hit percentage, one decimal place
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    /// Builds the response from a stats snapshot, or the disabled form.
    pub fn new(stats: Option<CacheStats>) -> Self {
        match stats {
            Some(stats) => Self {
                enabled: true,
                size: stats.size,
                hits: stats.hits,
                misses: stats.misses,
                hit_rate: stats.hit_rate,
            },
            None => Self {
                enabled: false,
                size: 0,
                hits: 0,
                misses: 0,
                hit_rate: 0.0,
            },
        }
    }
}

/// Response body for clearing the cache (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Number of entries removed
    pub cleared: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Status Steam answered with, when the failure came from upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, upstream_status: Option<u16>) -> Self {
        Self {
            error: error.into(),
            upstream_status,
        }
    }
}
