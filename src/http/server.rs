//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all proxy handlers
//! - Wire up middleware (tracing, limits, request ID)
//! - Bind server to listener
//! - Apply hot config reloads via atomic state swap
//! - Serve until shutdown is signalled

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::schema::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::proxy::error::GatewayError;
use crate::proxy::{analyze, auth};
use crate::upstream::UpstreamClient;

/// Everything a handler needs, swapped atomically on config reload.
pub struct InnerState {
    pub config: GatewayConfig,
    pub upstream: UpstreamClient,
}

impl InnerState {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self { config, upstream })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<InnerState>>,
}

/// HTTP server for the analysis gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let inner = InnerState::new(config.clone())?;
        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(inner)),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Body and concurrency limits are fixed at startup; a reload swaps the
    /// upstream target and analysis mode but not the middleware stack.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/auth/login", post(auth::login))
            .route("/api/auth/register", post(auth::register))
            .route("/api/auth/forgot-password", post(auth::forgot_password))
            .route("/api/analyze", post(analyze::analyze))
            .route("/health", get(health))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config updates arriving on `config_updates` are validated and applied
    /// atomically; the server keeps serving on the original listener.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        spawn_config_swapper(self.state.clone(), config_updates);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn spawn_config_swapper(
    state: AppState,
    mut updates: mpsc::UnboundedReceiver<GatewayConfig>,
) {
    tokio::spawn(async move {
        while let Some(new_config) = updates.recv().await {
            match InnerState::new(new_config) {
                Ok(inner) => {
                    state.inner.store(Arc::new(inner));
                    tracing::info!("Configuration reloaded");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Rejected configuration update");
                }
            }
        }
    });
}

#[derive(Serialize)]
struct HealthStatus {
    name: &'static str,
    version: &'static str,
    status: &'static str,
    analysis_mode: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let inner = state.inner.load_full();
    Json(HealthStatus {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        analysis_mode: inner.config.analysis.mode.as_str(),
    })
}
