//! Internship Registration - Entry point.

use intern_registration::{
    api::{create_router, AppState},
    config::{Config, LogFormat},
    registry::Store,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    info!("Starting Internship Registration service");

    // Initialize storage
    let store = if config.registry.persist {
        Store::file(config.registry.path.clone(), config.registry.on_corrupt)
    } else {
        Store::memory()
    };

    match store.count().await {
        Ok(n) => info!("Registration store holds {} records", n),
        Err(e) => warn!("Registration store is not readable yet: {}", e),
    }

    let app = create_router(AppState::new(store));

    // Bind to address
    let addr = match config.server.listen_addr.parse() {
        Ok(ip) => SocketAddr::new(ip, config.server.port),
        Err(e) => {
            error!("Invalid listen address {:?}: {}", config.server.listen_addr, e);
            std::process::exit(1);
        }
    };

    info!("Listening on http://{}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server until Ctrl-C
    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
