//! Analysis proxy route.
//!
//! One client-facing endpoint, two deployment contracts selected by
//! `analysis.mode`:
//!
//! - **buffered**: `{repo_url, model_id}` forwarded, full JSON report
//!   relayed byte-identical once the backend finishes;
//! - **streaming**: `{code, model_id}` forwarded, the backend body piped
//!   through as a live `text/plain` stream, chunk boundaries preserved.
//!
//! The streaming success path never buffers. Backend errors are the one
//! exception: those are buffered, parsed, and answered as JSON so error
//! rendering stays uniform across both contracts. The relay holds a single
//! backend connection for the lifetime of each client request and sets no
//! deadline of its own; if the client goes away the connection closes and
//! the backend notices on its next write.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::config::schema::AnalysisMode;
use crate::http::server::{AppState, InnerState};
use crate::observability::metrics;
use crate::proxy::error::{error_response, extract_backend_message, GatewayError};
use crate::proxy::relay::{forward_buffered, reject, relay_status};

const ANALYZE_ROUTE: &str = "/api/analyze";
const ANALYSIS_FALLBACK: &str = "Analysis failed";

/// POST /api/analyze.
pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    let inner = state.inner.load_full();
    let body = payload.map(|Json(v)| v).unwrap_or(Value::Null);
    let bearer = bearer_token(&headers);

    match inner.config.analysis.mode {
        AnalysisMode::Buffered => analyze_buffered(&inner, &body, bearer, started).await,
        AnalysisMode::Streaming => analyze_streaming(&inner, &body, bearer, started).await,
    }
}

async fn analyze_buffered(
    inner: &InnerState,
    body: &Value,
    bearer: Option<&str>,
    started: Instant,
) -> Result<Response, GatewayError> {
    let Some(repo_url) = body.get("repo_url").and_then(Value::as_str) else {
        return Ok(reject(ANALYZE_ROUTE, started, "Repo URL is required"));
    };

    let forwarded = json!({
        "repo_url": repo_url,
        "model_id": model_id(inner, body),
    });
    forward_buffered(
        &inner.upstream,
        &inner.config.analysis.path,
        &forwarded,
        bearer,
        ANALYSIS_FALLBACK,
        ANALYZE_ROUTE,
        started,
    )
    .await
}

async fn analyze_streaming(
    inner: &InnerState,
    body: &Value,
    bearer: Option<&str>,
    started: Instant,
) -> Result<Response, GatewayError> {
    let Some(code) = body.get("code").and_then(Value::as_str) else {
        return Ok(reject(ANALYZE_ROUTE, started, "Code is required"));
    };

    let forwarded = json!({
        "code": code,
        "model_id": model_id(inner, body),
    });
    let upstream_response = inner
        .upstream
        .post_json(&inner.config.analysis.path, &forwarded, bearer)
        .await
        .inspect_err(|_| metrics::record_upstream_error(ANALYZE_ROUTE))?;

    let status = relay_status(upstream_response.status());
    metrics::record_request(ANALYZE_ROUTE, status.as_u16(), started);

    // The error path is the one place the relay buffers: the backend's
    // failure payload is JSON, not report text.
    if !status.is_success() {
        let bytes = upstream_response.bytes().await?;
        let parsed: Value = serde_json::from_slice(&bytes)?;
        let message = extract_backend_message(&parsed, ANALYSIS_FALLBACK);
        tracing::warn!(
            route = ANALYZE_ROUTE,
            status = status.as_u16(),
            message = %message,
            "Upstream rejected analysis"
        );
        return Ok(error_response(status, message));
    }

    tracing::debug!(route = ANALYZE_ROUTE, "Relaying analysis stream");
    let stream = upstream_response.bytes_stream();
    Ok((
        status,
        [(header::CONTENT_TYPE, "text/plain")],
        Body::from_stream(stream),
    )
        .into_response())
}

fn model_id<'a>(inner: &'a InnerState, body: &'a Value) -> &'a str {
    body.get("model_id")
        .and_then(Value::as_str)
        .unwrap_or(&inner.config.analysis.default_model)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
