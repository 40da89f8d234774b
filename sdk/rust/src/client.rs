//! HTTP client for the gateway's proxy endpoints.

use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::SdkError;
use crate::report::AnalysisResult;
use crate::session::Session;

/// A selectable analysis model.
#[derive(Debug, Clone, Copy)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models the dashboard offers; the first is the default.
pub const MODELS: [ModelOption; 3] = [
    ModelOption {
        id: "llama-3.3-70b-versatile",
        name: "Llama 3.3 70B (Balanced)",
    },
    ModelOption {
        id: "qwen/qwen3-32b",
        name: "Qwen 3 32B (Competitor)",
    },
    ModelOption {
        id: "llama-3.1-8b-instant",
        name: "Llama 3.1 8B (Fast)",
    },
];

/// Analysis request body. The deployed gateway mode dictates which source
/// field it requires: `repo_url` for buffered reports, `code` for streamed
/// ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl AnalyzeRequest {
    /// Analyze a repository by URL (buffered deployments).
    pub fn repository(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: Some(repo_url.into()),
            ..Self::default()
        }
    }

    /// Analyze a code snippet (streaming deployments).
    pub fn snippet(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// Client for one gateway instance.
pub struct GatewayClient {
    client: reqwest::Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway_url, path)
    }

    /// Log in and return an authenticated session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SdkError> {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(gateway_error(status.as_u16(), &text, "Login failed"));
        }

        let body: Value = serde_json::from_str(&text)?;
        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or(SdkError::MissingField("access_token"))?;
        Ok(Session::authenticated(token))
    }

    /// Register a new account.
    ///
    /// The confirmation password is checked here and never leaves the
    /// client; the gateway only ever sees `{name, email, password}`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Value, SdkError> {
        if password != confirm_password {
            return Err(SdkError::Validation("Passwords do not match".into()));
        }

        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(gateway_error(status.as_u16(), &text, "Registration failed"));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Request a password-recovery email.
    pub async fn forgot_password(&self, email: &str) -> Result<Value, SdkError> {
        let resp = self
            .client
            .post(self.url("/api/auth/forgot-password"))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(gateway_error(
                status.as_u16(),
                &text,
                "Failed to send reset email.",
            ));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Run a buffered analysis and return the full report.
    pub async fn analyze(
        &self,
        session: &Session,
        request: &AnalyzeRequest,
    ) -> Result<AnalysisResult, SdkError> {
        let mut req = self.client.post(self.url("/api/analyze")).json(request);
        if let Some(bearer) = session.bearer() {
            req = req.header(AUTHORIZATION, bearer);
        }
        let resp = req.send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(gateway_error(status.as_u16(), &text, "Analysis failed"));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Run a streamed analysis.
    ///
    /// Chunks are decoded and handed to `on_chunk` in arrival order while
    /// also being appended to an accumulation buffer, which is returned once
    /// the backend closes the stream. The stream is single-pass: there is no
    /// pause, rewind, or resume. Dropping the future closes the connection.
    pub async fn analyze_stream(
        &self,
        session: &Session,
        request: &AnalyzeRequest,
        mut on_chunk: impl FnMut(&str),
    ) -> Result<String, SdkError> {
        let mut req = self.client.post(self.url("/api/analyze")).json(request);
        if let Some(bearer) = session.bearer() {
            req = req.header(AUTHORIZATION, bearer);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await?;
            return Err(gateway_error(status.as_u16(), &text, "Analysis failed"));
        }

        let mut stream = resp.bytes_stream();
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            let text = String::from_utf8_lossy(&chunk);
            on_chunk(&text);
            buffer.push_str(&text);
        }
        Ok(buffer)
    }
}

/// Reduce a gateway error body to an [`SdkError::Gateway`].
pub(crate) fn gateway_error(status: u16, body: &str, fallback: &str) -> SdkError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(String::from))
        .unwrap_or_else(|| fallback.to_string());
    SdkError::Gateway { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_serializes_only_set_fields() {
        let request = AnalyzeRequest::repository("https://github.com/acme/demo");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["repo_url"], "https://github.com/acme/demo");
        assert!(value.get("code").is_none());
        assert!(value.get("model_id").is_none());

        let request = AnalyzeRequest::snippet("fn main() {}").with_model(MODELS[2].id);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["code"], "fn main() {}");
        assert_eq!(value["model_id"], "llama-3.1-8b-instant");
        assert!(value.get("repo_url").is_none());
    }

    #[test]
    fn gateway_error_prefers_envelope_message() {
        let err = gateway_error(422, r#"{"error": "X"}"#, "fallback");
        let SdkError::Gateway { status, message } = err else {
            panic!("expected Gateway error");
        };
        assert_eq!(status, 422);
        assert_eq!(message, "X");
    }

    #[test]
    fn gateway_error_falls_back_on_junk() {
        let err = gateway_error(500, "<html>oops</html>", "Analysis failed");
        let SdkError::Gateway { message, .. } = err else {
            panic!("expected Gateway error");
        };
        assert_eq!(message, "Analysis failed");
    }
}
