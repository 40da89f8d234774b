//! Authentication proxy routes.
//!
//! Each handler is a buffered pass-through: validate field presence, forward
//! the JSON body to the backend auth service, relay the outcome. No
//! credential ever persists in the gateway and no session state is kept
//! here; the access token issued by the backend belongs to the client.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::http::server::AppState;
use crate::proxy::error::GatewayError;
use crate::proxy::relay::{forward_buffered, reject};

const LOGIN_ROUTE: &str = "/api/auth/login";
const REGISTER_ROUTE: &str = "/api/auth/register";
const FORGOT_PASSWORD_ROUTE: &str = "/api/auth/forgot-password";

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// POST /api/auth/login → backend /auth/login.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    let inner = state.inner.load_full();
    let body = payload.map(|Json(v)| v).unwrap_or(Value::Null);

    let (Some(email), Some(password)) = (field(&body, "email"), field(&body, "password")) else {
        return Ok(reject(LOGIN_ROUTE, started, "Email and password are required"));
    };

    let forwarded = json!({ "email": email, "password": password });
    forward_buffered(
        &inner.upstream,
        "/auth/login",
        &forwarded,
        None,
        "Invalid credentials",
        LOGIN_ROUTE,
        started,
    )
    .await
}

/// POST /api/auth/register → backend /auth/signup.
///
/// The client field `name` travels as `full_name`; a `confirmPassword`
/// field, if present, is client-side only and never forwarded.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    let inner = state.inner.load_full();
    let body = payload.map(|Json(v)| v).unwrap_or(Value::Null);

    let (Some(name), Some(email), Some(password)) = (
        field(&body, "name"),
        field(&body, "email"),
        field(&body, "password"),
    ) else {
        return Ok(reject(
            REGISTER_ROUTE,
            started,
            "Name, email and password are required",
        ));
    };

    let forwarded = json!({
        "email": email,
        "password": password,
        "full_name": name,
    });
    forward_buffered(
        &inner.upstream,
        "/auth/signup",
        &forwarded,
        None,
        "Registration failed",
        REGISTER_ROUTE,
        started,
    )
    .await
}

/// POST /api/auth/forgot-password → backend /auth/password-recovery.
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    let inner = state.inner.load_full();
    let body = payload.map(|Json(v)| v).unwrap_or(Value::Null);

    let Some(email) = field(&body, "email") else {
        return Ok(reject(FORGOT_PASSWORD_ROUTE, started, "Email is required"));
    };

    let forwarded = json!({ "email": email });
    forward_buffered(
        &inner.upstream,
        "/auth/password-recovery",
        &forwarded,
        None,
        "Failed to send reset email.",
        FORGOT_PASSWORD_ROUTE,
        started,
    )
    .await
}
