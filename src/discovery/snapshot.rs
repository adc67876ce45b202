//! Per-call lag snapshots.

use crate::discovery::tablet::TabletHealth;

/// A tablet paired with the lag read once at the start of a filtering call.
///
/// Sorting and statistics use `replication_lag`, never the tablet's stats
/// directly, so one call sees one value per tablet.
#[derive(Debug, Clone, Copy)]
pub struct LagSnapshot<'a> {
    pub tablet: &'a TabletHealth,
    pub replication_lag: u32,
}

impl<'a> LagSnapshot<'a> {
    /// Capture the lag of a tablet. Returns `None` for tablets without stats.
    pub fn capture(tablet: &'a TabletHealth) -> Option<Self> {
        tablet.replication_lag().map(|replication_lag| Self {
            tablet,
            replication_lag,
        })
    }
}

/// Sort ascending by lag. Equal lags keep their input order.
pub fn sort_by_lag(snapshots: &mut [LagSnapshot<'_>]) {
    snapshots.sort_by_key(|s| s.replication_lag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::testutil::tablet_with_lag;

    #[test]
    fn test_ties_keep_input_order() {
        let tablets = [
            tablet_with_lag(1, 20),
            tablet_with_lag(2, 10),
            tablet_with_lag(3, 20),
            tablet_with_lag(4, 10),
        ];
        let mut snaps: Vec<_> = tablets.iter().filter_map(LagSnapshot::capture).collect();
        sort_by_lag(&mut snaps);

        let uids: Vec<u32> = snaps.iter().map(|s| s.tablet.tablet.uid).collect();
        assert_eq!(uids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_capture_skips_missing_stats() {
        let mut t = tablet_with_lag(1, 5);
        t.stats = None;
        assert!(LagSnapshot::capture(&t).is_none());
    }
}
