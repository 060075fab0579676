//! ECFS comment service.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                   COMMENT SERVICE                     │
//!                 │                                                       │
//!   Browser       │  ┌─────────┐    ┌──────────┐    ┌──────────────┐      │
//!   ──────────────┼─▶│  http   │───▶│   form   │───▶│   backoff    │      │
//!   POST /submit  │  │ server  │    │ validate │    │ retry driver │      │
//!                 │  └─────────┘    └──────────┘    └──────┬───────┘      │
//!                 │       │                                │              │
//!                 │       ▼                                ▼              │     ECFS
//!   GET /         │  ┌─────────┐                    ┌──────────────┐      │     API
//!   ◀─────────────┼──│ static  │                    │ ecfs client  │──────┼───▶ proceedings
//!                 │  │  files  │                    │ build/submit │      │     filings
//!                 │  └─────────┘                    └──────────────┘      │
//!                 │                                                       │
//!                 │  config · credentials · lifecycle · observability     │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tokio::net::TcpListener;

use ecfs_comment::config::{load_config_if_present, AppConfig};
use ecfs_comment::lifecycle::{self, signals, Shutdown};
use ecfs_comment::observability::{logging, metrics};
use ecfs_comment::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        PathBuf::from(std::env::var("ECFS_CONFIG").unwrap_or_else(|_| "config.toml".to_string()));

    // The subscriber needs the configured level, so config is read first and
    // anything worth reporting about it is logged afterwards.
    let config = match load_config_if_present(&config_path) {
        Ok(Some(config)) => {
            logging::init_tracing(&config.observability);
            config
        }
        Ok(None) => {
            let config = AppConfig::default();
            logging::init_tracing(&config.observability);
            tracing::info!(path = %config_path.display(), "No config file, using defaults");
            config
        }
        Err(e) => {
            logging::init_tracing(&Default::default());
            tracing::error!(path = %config_path.display(), error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        proceeding = %config.ecfs.proceeding,
        backoff_factor = config.backoff.factor,
        backoff_max_ms = config.backoff.max_delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let state = match lifecycle::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, state);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
