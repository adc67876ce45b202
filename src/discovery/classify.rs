//! Lag classification predicates.

use std::time::Duration;
use crate::discovery::settings::LagSettings;
use crate::discovery::tablet::TabletHealth;

/// True if the tablet's lag exceeds the low replication lag threshold.
///
/// A tablet without stats is never classified as lagging; callers drop
/// those before classifying.
pub fn is_replication_lag_high<S: LagSettings + ?Sized>(settings: &S, tablet: &TabletHealth) -> bool {
    tablet
        .replication_lag()
        .is_some_and(|lag| lag_high(settings, lag))
}

/// True if the tablet's lag exceeds the minimum-serving cutoff.
pub fn is_replication_lag_very_high<S: LagSettings + ?Sized>(settings: &S, tablet: &TabletHealth) -> bool {
    tablet
        .replication_lag()
        .is_some_and(|lag| lag_very_high(settings, lag))
}

pub(crate) fn lag_high<S: LagSettings + ?Sized>(settings: &S, lag_seconds: u32) -> bool {
    exceeds(lag_seconds, settings.low_replication_lag())
}

pub(crate) fn lag_very_high<S: LagSettings + ?Sized>(settings: &S, lag_seconds: u32) -> bool {
    exceeds(lag_seconds, settings.high_replication_lag_min_serving())
}

fn exceeds(lag_seconds: u32, threshold: Duration) -> bool {
    f64::from(lag_seconds) > threshold.as_secs_f64()
}
