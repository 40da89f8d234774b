//! Client SDK for the analysis gateway.
//!
//! Mirrors what the browser dashboard does, minus the rendering: an
//! explicit [`Session`] instead of ambient storage, a [`GatewayClient`]
//! for the proxy endpoints, defensive report parsing, and the dashboard
//! submit/countdown state machine.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod report;
pub mod session;

pub use client::{AnalyzeRequest, GatewayClient, ModelOption, MODELS};
pub use dashboard::{AnalysisView, Dashboard, DashboardState, RATE_LIMIT_COOLDOWN_SECS};
pub use error::SdkError;
pub use report::{AnalysisResult, LlmReport};
pub use session::{Session, ACCESS_TOKEN_KEY};
