//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID stamped, propagated)
//!     → proxy handlers (validate, forward, relay)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeGatewayRequestId, X_REQUEST_ID};
pub use server::HttpServer;
