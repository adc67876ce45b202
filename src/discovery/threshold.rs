//! Rank-based lag filter.
//!
//! Tablets with low lag always pass. Tablets with high lag pass only while
//! the minimum serving count is not yet met, and never above the
//! minimum-serving cutoff.

use crate::discovery::classify::{lag_high, lag_very_high};
use crate::discovery::settings::LagSettings;
use crate::discovery::snapshot::{sort_by_lag, LagSnapshot};
use crate::discovery::tablet::TabletHealth;

/// Filter `tablets`, returning survivors ordered by ascending lag.
pub fn filter_stats_by_lag<'a, S: LagSettings + ?Sized>(
    settings: &S,
    tablets: &[&'a TabletHealth],
) -> Vec<&'a TabletHealth> {
    let mut list: Vec<LagSnapshot<'a>> = tablets
        .iter()
        .copied()
        .filter(|t| t.is_candidate())
        .filter_map(LagSnapshot::capture)
        .filter(|s| !lag_very_high(settings, s.replication_lag))
        .collect();

    sort_by_lag(&mut list);

    let min_tablets = settings.min_number_serving_tablets();
    list.iter()
        .enumerate()
        .filter(|(rank, s)| *rank < min_tablets || !lag_high(settings, s.replication_lag))
        .map(|(_, s)| s.tablet)
        .collect()
}
