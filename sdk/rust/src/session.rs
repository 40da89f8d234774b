//! Explicit session state.
//!
//! The access token is an opaque string issued by the backend on login. It
//! lives in a `Session` value owned by the caller and travels as a bearer
//! header; nothing is stashed in ambient global state, which keeps consumers
//! testable without a browser environment.

/// Storage key under which embedders persist the token, if they persist it
/// at all.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// A client session: either anonymous or holding one opaque access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// A session with no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying an already-issued token.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Set the token after a successful login.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the token (logout).
    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The `Authorization` header value, when authenticated.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}
