//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Own the shared settings store and the current config
//! - Build the Axum router with the admin routes
//! - Apply config reloads while serving
//! - Shut down gracefully on signal

use arc_swap::ArcSwap;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::trace::TraceLayer;

use crate::admin::setup_admin_router;
use crate::config::GatewayConfig;
use crate::discovery::{AtomicLagSettings, ReplicationLagFilter};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current configuration, swapped whole on reload.
    pub config: Arc<ArcSwap<GatewayConfig>>,
    /// Filter bound to the live settings store.
    pub filter: ReplicationLagFilter<AtomicLagSettings>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let settings = Arc::new(AtomicLagSettings::new(config.discovery));
        metrics::record_settings(&config.discovery);
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            filter: ReplicationLagFilter::new(settings),
        }
    }

    pub fn settings(&self) -> &AtomicLagSettings {
        self.filter.settings()
    }

    /// Install a reloaded configuration.
    pub fn apply_config(&self, config: GatewayConfig) {
        let previous = self.settings().snapshot();
        self.settings().apply(&config.discovery);
        metrics::record_settings(&config.discovery);

        if previous != config.discovery {
            tracing::info!(
                low_replication_lag_secs = config.discovery.low_replication_lag.as_secs_f64(),
                high_replication_lag_secs = config.discovery.high_replication_lag_min_serving.as_secs_f64(),
                min_number_serving_tablets = config.discovery.min_number_serving_tablets,
                legacy_algorithm = config.discovery.legacy_algorithm,
                "Replication lag settings reloaded"
            );
        }
        self.config.store(Arc::new(config));
    }
}

/// HTTP server exposing the admin and filter endpoints.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState::new(config);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    fn build_router(state: AppState) -> Router {
        setup_admin_router(state).layer(TraceLayer::new_for_http())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// A clone of the router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, applying config updates as
    /// they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                reload_state.apply_config(config);
            }
        });

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        result
    }
}
