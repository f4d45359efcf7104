//! services/reader_host/src/error.rs
//!
//! Defines the primary error type for the reader host service.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_reader_core::ports::PortError;
use tracing::error;

/// The primary error type for the `reader_host` service.
#[derive(Debug, thiserror::Error)]
pub enum ReaderHostError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the HTTP client used to reach the backend.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents an error related to the WebSocket connection.
    #[error("WebSocket Error: {0}")]
    Websocket(#[from] axum::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A startup problem that does not fit any other variant.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ReaderHostError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReaderHostError::Port(PortError::NotFound(_)) => StatusCode::NOT_FOUND,
            ReaderHostError::Port(PortError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {:?}", self);
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_status_codes() {
        let missing = ReaderHostError::from(PortError::NotFound("a.txt".to_string()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let down = ReaderHostError::from(PortError::Unavailable("refused".to_string()));
        assert_eq!(down.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let other = ReaderHostError::Internal("boom".to_string());
        assert_eq!(other.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
