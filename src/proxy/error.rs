//! Error shapes crossing the proxy boundary.
//!
//! Exactly one error shape ever reaches a client: `{"error": "<message>"}`.
//! Backend failures of unknown shape are reduced to that envelope by
//! [`extract_backend_message`]; internal failures are reduced to a fixed
//! 500 with the detail kept server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::observability::metrics;

/// The sole error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Build an error response in the client-facing envelope.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Extract a human-readable message from a backend error payload.
///
/// Checked in order, for `detail` then `error`:
/// - a plain string is used as-is,
/// - an array of validation-error objects yields the first entry's `msg`,
/// - anything else falls back to the endpoint's fixed message.
pub fn extract_backend_message(payload: &Value, fallback: &str) -> String {
    for key in ["detail", "error"] {
        match payload.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Array(entries)) => {
                if let Some(msg) = entries
                    .first()
                    .and_then(|entry| entry.get("msg"))
                    .and_then(Value::as_str)
                {
                    return msg.to_string();
                }
            }
            _ => {}
        }
    }
    fallback.to_string()
}

/// Internal failure while proxying a request.
///
/// None of these variants ever leak to a client; the `IntoResponse` impl
/// logs the cause and answers with the fixed internal-error envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned a malformed body: {0}")]
    MalformedUpstreamBody(#[from] serde_json::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Proxy request failed");
        metrics::record_internal_error();
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}
