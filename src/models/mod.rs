//! Request and Response models for the gateway API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::ToolCallRequest;
pub use responses::{
    CacheStatsResponse, ClearCacheResponse, ErrorResponse, HealthResponse, ToolCallResponse,
    ToolListResponse, ToolSummary,
};
