//! Buffered relay plumbing shared by every proxy route.

use std::time::Instant;

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::observability::metrics;
use crate::proxy::error::{error_response, extract_backend_message, GatewayError};
use crate::upstream::UpstreamClient;

/// Reject a request before any network call is made.
pub fn reject(route: &'static str, started: Instant, message: &str) -> Response {
    metrics::record_request(route, StatusCode::BAD_REQUEST.as_u16(), started);
    error_response(StatusCode::BAD_REQUEST, message)
}

/// Forward a JSON payload to the upstream and relay the outcome.
///
/// Success bodies are relayed byte-identical; non-success bodies are parsed
/// and reduced to the `{"error": ...}` envelope with the upstream status.
/// A fetch or parse failure propagates as [`GatewayError`] and becomes the
/// fixed internal-error response.
pub async fn forward_buffered(
    upstream: &UpstreamClient,
    path: &str,
    payload: &Value,
    bearer: Option<&str>,
    fallback: &str,
    route: &'static str,
    started: Instant,
) -> Result<Response, GatewayError> {
    let upstream_response = upstream
        .post_json(path, payload, bearer)
        .await
        .inspect_err(|_| metrics::record_upstream_error(route))?;

    let status = relay_status(upstream_response.status());
    let bytes = upstream_response.bytes().await?;

    // Parse even on success: a backend that answers with something other
    // than JSON is an internal failure, not a relayable response.
    let parsed: Value = serde_json::from_slice(&bytes)?;

    let response = if status.is_success() {
        relay_json_bytes(status, bytes)
    } else {
        let message = extract_backend_message(&parsed, fallback);
        tracing::warn!(route, status = status.as_u16(), message = %message, "Upstream reported an error");
        error_response(status, message)
    };

    metrics::record_request(route, status.as_u16(), started);
    tracing::debug!(route, status = status.as_u16(), "Relayed upstream response");
    Ok(response)
}

/// Relay a successful upstream JSON body without re-serializing it.
fn relay_json_bytes(status: StatusCode, bytes: Bytes) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response()
}

/// Convert an upstream status into a client-facing one.
pub fn relay_status(upstream: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(upstream.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}
