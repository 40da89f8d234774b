//! OS signal handling.

use crate::lifecycle::shutdown::Shutdown;

/// Install signal handlers that trigger graceful shutdown.
///
/// SIGINT (Ctrl+C) and, on unix, SIGTERM both trigger the coordinator.
pub fn spawn_handlers(shutdown: Shutdown) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        tracing::info!("Termination signal received");
        shutdown.trigger();
    });
}
