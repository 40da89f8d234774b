use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use refine_gateway::config::loader::load_config;
use refine_gateway::config::watcher::ConfigWatcher;
use refine_gateway::config::GatewayConfig;
use refine_gateway::http::HttpServer;
use refine_gateway::lifecycle::{signals, Shutdown};
use refine_gateway::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config path from argv or GATEWAY_CONFIG; defaults apply without one.
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("GATEWAY_CONFIG").ok())
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        analysis_mode = config.analysis.mode.as_str(),
        "refine-gateway starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Hot reload only makes sense when the config came from a file. The
    // watcher handle must stay alive for the watch to keep running.
    let (config_updates, _watcher_handle) = match &config_path {
        Some(path) => {
            let (watcher, update_rx) = ConfigWatcher::new(path);
            (update_rx, Some(watcher.run()?))
        }
        None => {
            let (_, update_rx) = mpsc::unbounded_channel();
            (update_rx, None)
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_handlers(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
