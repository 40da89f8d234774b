//! HTTP client for the analysis backend.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::config::schema::UpstreamConfig;
use crate::proxy::error::GatewayError;

/// Shared client for all upstream calls.
///
/// Only a connect timeout is configured; total request time is left to the
/// transport so streamed analysis bodies can run as long as the backend
/// keeps writing.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Resolve an endpoint path against the configured base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url.join(path).map_err(GatewayError::from)
    }

    /// POST a JSON payload, optionally carrying the caller's bearer token.
    pub async fn post_json(
        &self,
        path: &str,
        payload: &Value,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = self.endpoint(path)?;
        let mut request = self.http.post(url).json(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(GatewayError::from)
    }
}
