//! Tablet discovery: replication lag filtering.
//!
//! # Data Flow
//! ```text
//! health-check stream
//!     → Vec<TabletHealth> per (keyspace, shard, tablet type)
//!     → selector.rs (pick algorithm from settings.rs)
//!         - threshold.rs (rank-based floor)
//!         - legacy.rs (leave-one-out outlier test, optional second pass)
//!     → eligible tablets, returned to the query router
//! ```
//!
//! # Design Decisions
//! - Filtering is a pure function of (input list, current settings)
//! - Settings are the only shared mutable state, one atomic per parameter
//! - Unusable tablets are silently excluded, never reported as errors
//! - Lag is read once per tablet per call (snapshot.rs)

pub mod classify;
pub mod error;
pub mod legacy;
pub mod selector;
pub mod settings;
pub mod snapshot;
pub mod tablet;
pub mod threshold;

pub use classify::{is_replication_lag_high, is_replication_lag_very_high};
pub use error::FilterError;
pub use selector::{filter_stats_by_replication_lag, Algorithm, ReplicationLagFilter};
pub use settings::{AtomicLagSettings, LagSettings, LagThresholds};
pub use tablet::{RealtimeStats, Target, TabletAlias, TabletHealth, TabletType};
