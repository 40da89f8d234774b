use thiserror::Error;

/// Errors surfaced by the SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// The gateway answered with its error envelope.
    #[error("{message}")]
    Gateway { status: u16, message: String },

    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response had an unexpected body.
    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A successful response was missing a required field.
    #[error("gateway response missing {0}")]
    MissingField(&'static str),

    /// Rejected client-side, before any network call.
    #[error("{0}")]
    Validation(String),
}
