//! Error types for the employee gateway
//!
//! Every failure the gateway can surface collapses into [`GatewayError`]. Its
//! classified variants project onto [`ErrorKind`], which drives both the retry
//! policy and the HTTP status mapping.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

// == Error Kind ==
/// Classification of a failure, independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    UpstreamTransient,
    UpstreamPermanent,
    InvalidInput,
    Protocol,
}

impl ErrorKind {
    /// Only throttling and upstream 5xx responses are worth another attempt.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::RateLimited | ErrorKind::UpstreamTransient)
    }
}

// == Gateway Error Enum ==
/// Unified error type for the gateway.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// The upstream has no employee for the given subject (id or name)
    #[error("Employee not found: {0}")]
    NotFound(String),

    /// Upstream answered 429
    #[error("Rate limited by upstream: {0}")]
    RateLimited(String),

    /// Upstream answered 5xx
    #[error("Upstream unavailable: {0}")]
    UpstreamTransient(String),

    /// Upstream rejected the request with a non-retryable status
    #[error("Upstream rejected request: {0}")]
    UpstreamPermanent(String),

    /// Request failed validation before reaching the cache or upstream
    #[error("Validation failed: {0:?}")]
    InvalidInput(FieldErrors),

    /// Network failure, timeout or an unreadable upstream body
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Anything unclassified; never exposed verbatim to clients
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the classified kind, or `None` for unclassified failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GatewayError::NotFound(_) => Some(ErrorKind::NotFound),
            GatewayError::RateLimited(_) => Some(ErrorKind::RateLimited),
            GatewayError::UpstreamTransient(_) => Some(ErrorKind::UpstreamTransient),
            GatewayError::UpstreamPermanent(_) => Some(ErrorKind::UpstreamPermanent),
            GatewayError::InvalidInput(_) => Some(ErrorKind::InvalidInput),
            GatewayError::Protocol(_) => Some(ErrorKind::Protocol),
            GatewayError::Internal(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_some_and(ErrorKind::is_retryable)
    }

    /// Builds a single-field validation error.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut details = FieldErrors::new();
        details.insert(field.to_string(), message.into());
        GatewayError::InvalidInput(details)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GatewayError::NotFound(_) => {
                warn!("{}", self);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": "Employee not found", "message": self.to_string() }),
                )
            }
            GatewayError::InvalidInput(details) => {
                warn!("Validation failed: {:?}", details);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Validation failed", "details": details }),
                )
            }
            GatewayError::RateLimited(_)
            | GatewayError::UpstreamTransient(_)
            | GatewayError::UpstreamPermanent(_)
            | GatewayError::Protocol(_) => {
                error!("Service error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Service error", "message": self.to_string() }),
                )
            }
            GatewayError::Internal(cause) => {
                error!("Unexpected error: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "message": "Something went wrong" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
