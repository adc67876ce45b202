//! Replication lag aware tablet filtering.
//!
//! The [`discovery`] module holds the filtering core and can be used on its
//! own; the remaining modules host it as a small admin service.

pub mod admin;
pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use discovery::{filter_stats_by_replication_lag, AtomicLagSettings, LagSettings, ReplicationLagFilter, TabletHealth};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
