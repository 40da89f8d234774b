//! Proxy routes: the client-facing surface of the gateway.
//!
//! # Data Flow
//! ```text
//! client JSON request
//!     → field presence check (reject before any network call)
//!     → upstream POST (fixed path per route)
//!     → success: body relayed (byte-identical JSON, or live text stream)
//!     → failure: reduced to {"error": message} via the shared policy
//! ```
//!
//! # Design Decisions
//! - One error envelope shape for every route
//! - Message extraction is identical regardless of which route triggered it
//! - Internal failures log the cause and answer a fixed 500

pub mod analyze;
pub mod auth;
pub mod error;
pub mod relay;

pub use error::{extract_backend_message, ErrorEnvelope, GatewayError};
