//! Tablet health snapshots as produced by the health-check stream.
//!
//! The filter never mutates these; it only reads fields and reorders
//! references to them.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Role a tablet plays within its shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabletType {
    Primary,
    Replica,
    Rdonly,
}

impl fmt::Display for TabletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabletType::Primary => write!(f, "primary"),
            TabletType::Replica => write!(f, "replica"),
            TabletType::Rdonly => write!(f, "rdonly"),
        }
    }
}

/// Unique address of a tablet instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TabletAlias {
    pub cell: String,
    pub uid: u32,
}

impl fmt::Display for TabletAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:010}", self.cell, self.uid)
    }
}

/// The (keyspace, shard, tablet type) group a tablet serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Target {
    pub keyspace: String,
    pub shard: String,
    pub tablet_type: TabletType,
}

/// Realtime statistics reported by a tablet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RealtimeStats {
    /// Seconds the tablet's applied data trails the primary.
    pub replication_lag_seconds: u32,
}

/// Latest health report for one tablet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TabletHealth {
    pub tablet: TabletAlias,
    pub target: Target,

    /// Whether the tablet considers itself able to serve.
    #[serde(default)]
    pub serving: bool,

    /// Set when the last health probe failed.
    #[serde(default)]
    pub last_error: Option<String>,

    /// `None` when lag is unknown.
    #[serde(default)]
    pub stats: Option<RealtimeStats>,
}

impl TabletHealth {
    /// Replication lag in seconds, if the tablet reported stats.
    pub fn replication_lag(&self) -> Option<u32> {
        self.stats.map(|s| s.replication_lag_seconds)
    }

    /// A tablet is a filtering candidate only if it serves, has no probe
    /// error and reported stats.
    pub fn is_candidate(&self) -> bool {
        self.serving && self.last_error.is_none() && self.stats.is_some()
    }
}
