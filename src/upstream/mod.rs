//! Upstream backend connectivity.

pub mod client;

pub use client::UpstreamClient;
