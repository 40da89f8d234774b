//! Analysis gateway library.
//!
//! A thin browser-facing gateway for a code-analysis product. Every route is
//! a pass-through to one upstream backend service:
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │              ANALYSIS GATEWAY                 │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌─────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│  proxy  │──▶│ upstream  │──┼──▶ Backend
//!                      │  │ server  │    │ routes  │   │  client   │  │    Service
//!                      │  └─────────┘    └─────────┘   └───────────┘  │
//!                      │                                               │
//!   Client Response    │   buffered JSON relay (byte-identical), or    │
//!   ◀──────────────────┼── live text/plain stream, or {"error": ...}  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns          │  │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │  │
//!                      │  │  │ config │ │observability│ │lifecycle│ │  │
//!                      │  │  └────────┘ └─────────────┘ └─────────┘ │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The gateway owns no analysis logic, no session state, and no retry
//! policy. Its observable contract is: reject requests missing the required
//! field before any network call, relay backend successes untouched, and
//! reduce every failure to the single `{"error": ...}` envelope.

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
