//! Maps upstream HTTP statuses onto the gateway's error taxonomy.

use reqwest::StatusCode;

use crate::error::GatewayError;

/// Classifies a non-success upstream status.
///
/// `subject` names the employee a single-record call addressed and becomes
/// the not-found message. Without a subject the call targeted the collection,
/// and a 404 is a permanent upstream failure. `context` describes the call for the other kinds.
pub fn classify_status(status: StatusCode, subject: Option<&str>, context: &str) -> GatewayError {
    let detail = format!("{} returned {}", context, status);
    match (status, subject) {
        (StatusCode::NOT_FOUND, Some(subject)) => GatewayError::NotFound(subject.to_string()),
        (StatusCode::NOT_FOUND, None) => GatewayError::UpstreamPermanent(detail),
        (StatusCode::TOO_MANY_REQUESTS, _) => GatewayError::RateLimited(detail),
        (s, _) if s.is_server_error() => GatewayError::UpstreamTransient(detail),
        (s, _) if s.is_client_error() => GatewayError::UpstreamPermanent(detail),
        // 1xx/3xx are not part of the upstream contract
        _ => GatewayError::Protocol(detail),
    }
}
