//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the analysis gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Upstream analysis backend the gateway forwards to.
    pub upstream: UpstreamConfig,

    /// Analysis endpoint contract.
    pub analysis: AnalysisConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Upstream backend configuration.
///
/// The gateway talks to exactly one backend service; every client-facing
/// route maps onto a fixed path under `base_url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the backend (e.g., "http://backend:8000").
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    ///
    /// The only timeout the gateway sets. Request and stream lifetimes are
    /// left to transport defaults so long-running analysis streams are not
    /// cut off mid-flight.
    pub connect_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://backend:8000".to_string(),
            connect_secs: 5,
        }
    }
}

/// Which analyze contract a deployment serves.
///
/// A deployment serves exactly one; the required request field follows the
/// mode (`repo_url` for buffered, `code` for streaming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Forward `{repo_url, model_id}` and relay the full JSON report.
    #[default]
    Buffered,
    /// Forward `{code, model_id}` and pipe the backend body through as a
    /// live text/plain stream.
    Streaming,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Buffered => "buffered",
            AnalysisMode::Streaming => "streaming",
        }
    }
}

/// Analysis endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Buffered or streaming relay.
    pub mode: AnalysisMode,

    /// Path of the analysis endpoint on the upstream.
    pub path: String,

    /// Model forwarded when the client does not pick one.
    pub default_model: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Buffered,
            path: "/analysis/".to_string(),
            default_model: "llama-3.3-70b-versatile".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
