//! Tablet discovery service.
//!
//! Hosts the replication lag filter behind an admin endpoint, with
//! hot-reloadable thresholds.
//!
//! ```text
//!   config file ──▶ watcher ──▶ AtomicLagSettings ◀── POST /debug/env
//!                                     │
//!   POST /discovery/filter ──▶ ReplicationLagFilter ──▶ eligible tablets
//! ```

use std::path::PathBuf;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tablet_discovery::config::{load_config, watcher::ConfigWatcher, GatewayConfig};
use tablet_discovery::http::HttpServer;
use tablet_discovery::lifecycle::{signals, Shutdown};
use tablet_discovery::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "tablet-discovery")]
#[command(about = "Replication lag aware tablet filtering service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the admin bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.admin.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("tablet-discovery v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.admin.bind_address,
        low_replication_lag_secs = config.discovery.low_replication_lag.as_secs_f64(),
        high_replication_lag_secs = config.discovery.high_replication_lag_min_serving.as_secs_f64(),
        min_number_serving_tablets = config.discovery.min_number_serving_tablets,
        legacy_algorithm = config.discovery.legacy_algorithm,
        "Configuration loaded"
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

    // Keep the watcher alive for the life of the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.admin.bind_address).await?;
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
