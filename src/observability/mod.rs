//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → stdout log output
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (keyspace, shard, algorithm) on filter events
//! - Metric updates are no-ops until a recorder is installed, so the
//!   filters can be used as a plain library

pub mod logging;
pub mod metrics;
