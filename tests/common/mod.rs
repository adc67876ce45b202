//! Shared builders for integration tests.

#![allow(dead_code)]

use tablet_discovery::discovery::{RealtimeStats, TabletAlias, TabletHealth, TabletType, Target};

pub fn tablet(uid: u32, lag: u32) -> TabletHealth {
    TabletHealth {
        tablet: TabletAlias { cell: "zone1".into(), uid },
        target: Target {
            keyspace: "commerce".into(),
            shard: "-80".into(),
            tablet_type: TabletType::Replica,
        },
        serving: true,
        last_error: None,
        stats: Some(RealtimeStats { replication_lag_seconds: lag }),
    }
}

pub fn fleet(lags: &[u32]) -> Vec<TabletHealth> {
    lags.iter()
        .enumerate()
        .map(|(i, &lag)| tablet(i as u32 + 1, lag))
        .collect()
}

pub fn uids(tablets: &[&TabletHealth]) -> Vec<u32> {
    tablets.iter().map(|t| t.tablet.uid).collect()
}

pub fn lags(tablets: &[TabletHealth]) -> Vec<u32> {
    tablets.iter().filter_map(|t| t.replication_lag()).collect()
}

/// A random fleet mixing healthy, lagging and unusable tablets.
pub fn random_fleet(rng: &mut fastrand::Rng) -> Vec<TabletHealth> {
    let size = rng.usize(0..12);
    (0..size)
        .map(|i| {
            let lag = match rng.u8(0..4) {
                0 => rng.u32(0..=30),
                1 => rng.u32(31..3600),
                2 => rng.u32(3600..=7200),
                _ => rng.u32(7201..200_000),
            };
            let mut t = tablet(i as u32 + 1, lag);
            match rng.u8(0..10) {
                0 => t.serving = false,
                1 => t.last_error = Some("health check timed out".into()),
                2 => t.stats = None,
                _ => {}
            }
            t
        })
        .collect()
}
