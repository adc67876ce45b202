//! Outlier-based lag filter, kept for compatibility.
//!
//! # Algorithm
//! ```text
//! 0 or 1 candidates            → return them
//! every candidate lag <= low   → return them
//! otherwise, per candidate i:
//!     keep i if mean(all except i) > 0.7 * mean(all)
//! kept >= min tablets          → return kept
//! otherwise                    → lowest-lag `min` candidates below the
//!                                high cutoff (or of all candidates if
//!                                none are below it)
//! ```
//!
//! Removing a genuine outlier pulls the remaining mean well under 70% of
//! the overall mean; removing a normal tablet barely moves it.

use crate::discovery::classify::{lag_high, lag_very_high};
use crate::discovery::error::FilterError;
use crate::discovery::settings::LagSettings;
use crate::discovery::snapshot::{sort_by_lag, LagSnapshot};
use crate::discovery::tablet::TabletHealth;

/// Fraction of the overall mean the leave-one-out mean must exceed.
pub const OUTLIER_MEAN_RATIO: f64 = 0.7;

/// Filter `tablets` with the legacy algorithm.
///
/// Tablets kept by the outlier test stay in input order; tablets picked by
/// the minimum-count fallback are ordered by lag.
pub fn filter_stats_by_lag_with_legacy_algorithm<'a, S: LagSettings + ?Sized>(
    settings: &S,
    tablets: &[&'a TabletHealth],
) -> Vec<&'a TabletHealth> {
    let list: Vec<LagSnapshot<'a>> = tablets
        .iter()
        .copied()
        .filter(|t| t.is_candidate())
        .filter_map(LagSnapshot::capture)
        .collect();

    if list.len() <= 1 {
        return tablets_of(&list);
    }

    if list.iter().all(|s| !lag_high(settings, s.replication_lag)) {
        return tablets_of(&list);
    }

    let totals = LagTotals::of(&list);
    let overall = mean_or_zero(totals.mean());
    let res: Vec<&'a TabletHealth> = list
        .iter()
        .filter(|s| {
            let without = mean_or_zero(totals.mean_excluding(s.replication_lag));
            without as f64 > overall as f64 * OUTLIER_MEAN_RATIO
        })
        .map(|s| s.tablet)
        .collect();

    let min_tablets = settings.min_number_serving_tablets();
    if res.len() >= min_tablets {
        return res;
    }

    let mut floor: Vec<LagSnapshot<'a>> = list
        .iter()
        .copied()
        .filter(|s| !lag_very_high(settings, s.replication_lag))
        .collect();
    if floor.is_empty() {
        // Every candidate is past the cutoff and their lags were too far
        // apart to group, e.g. 3h and 30h with a floor of 2.
        floor = list;
    }
    sort_by_lag(&mut floor);

    tracing::trace!(
        kept = res.len(),
        min_tablets,
        fallback = floor.len().min(min_tablets),
        "outlier test kept too few tablets, using lowest-lag fallback"
    );

    floor
        .into_iter()
        .take(min_tablets)
        .map(|s| s.tablet)
        .collect()
}

fn tablets_of<'a>(list: &[LagSnapshot<'a>]) -> Vec<&'a TabletHealth> {
    list.iter().map(|s| s.tablet).collect()
}

fn mean_or_zero(mean: Result<u64, FilterError>) -> u64 {
    mean.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "no lag data, treating mean as zero");
        0
    })
}

/// Running lag sum over a candidate list.
///
/// Leave-one-out means are derived from the total in O(1) each.
#[derive(Debug, Clone, Copy, Default)]
struct LagTotals {
    sum: u64,
    count: u64,
}

impl LagTotals {
    fn of(list: &[LagSnapshot<'_>]) -> Self {
        list.iter().fold(Self::default(), |acc, s| Self {
            sum: acc.sum + u64::from(s.replication_lag),
            count: acc.count + 1,
        })
    }

    /// Integer mean over every tablet.
    fn mean(&self) -> Result<u64, FilterError> {
        divide(self.sum, self.count)
    }

    /// Integer mean with one tablet of lag `lag` left out.
    fn mean_excluding(&self, lag: u32) -> Result<u64, FilterError> {
        let count = self.count.checked_sub(1).ok_or(FilterError::EmptyList)?;
        divide(self.sum.saturating_sub(u64::from(lag)), count)
    }
}

fn divide(sum: u64, count: u64) -> Result<u64, FilterError> {
    sum.checked_div(count).ok_or(FilterError::EmptyList)
}
