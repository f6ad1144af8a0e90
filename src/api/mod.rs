//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /tools` - List available tools
//! - `POST /tools/:name` - Run a tool
//! - `GET /cache/stats` - Response cache statistics
//! - `DELETE /cache` - Clear the response cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
