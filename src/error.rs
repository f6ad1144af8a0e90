//! Error types for the Steam gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Steam API Error Enum ==
/// Unified error type for the client core and everything built on it.
///
/// Variants that originate from an upstream response carry its HTTP status
/// code; see [`SteamApiError::status_code`].
#[derive(Error, Debug)]
pub enum SteamApiError {
    /// Missing or invalid configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any network activity
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Steam ID could not be parsed or resolved
    #[error("Invalid Steam ID: {0}")]
    InvalidSteamId(String),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Upstream answered 401 or 403
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// Upstream answered with HTML or a body that is not JSON
    #[error("{message}")]
    MalformedResponse { status: Option<u16>, message: String },

    /// Transient failures persisted for the whole attempt budget
    #[error("Request failed after {attempts} attempts: {last_failure}")]
    RetriesExhausted { attempts: u32, last_failure: String },

    /// Any other transport or non-2xx failure
    #[error("HTTP error: {message}")]
    Http { status: Option<u16>, message: String },
}

impl SteamApiError {
    // == Status Code ==
    /// Returns the upstream HTTP status code, if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SteamApiError::Unauthorized { status, .. } => Some(*status),
            SteamApiError::MalformedResponse { status, .. } => *status,
            SteamApiError::Http { status, .. } => *status,
            _ => None,
        }
    }

    // == Access Denied ==
    /// True for 401/403 responses.
    ///
    /// For per-player endpoints these usually mean the profile is private,
    /// although Steam does not guarantee that mapping.
    pub fn is_access_denied(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    /// Builds a transport error from a reqwest failure.
    pub(crate) fn from_transport(context: &str, err: reqwest::Error) -> Self {
        SteamApiError::Http {
            status: err.status().map(|s| s.as_u16()),
            message: format!("{}: {}", context, err),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for SteamApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            SteamApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SteamApiError::Validation(_) => StatusCode::BAD_REQUEST,
            SteamApiError::InvalidSteamId(_) => StatusCode::BAD_REQUEST,
            SteamApiError::UnknownTool(_) => StatusCode::NOT_FOUND,
            SteamApiError::RetriesExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SteamApiError::Unauthorized { .. }
            | SteamApiError::MalformedResponse { .. }
            | SteamApiError::Http { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse::new(self.to_string(), self.status_code()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, SteamApiError>;
