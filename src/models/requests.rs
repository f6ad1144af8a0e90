//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::client::Params;

/// Request body for a tool call (POST /tools/:name)
///
/// An absent `arguments` field is treated as an empty object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default)]
    pub arguments: Params,
}
