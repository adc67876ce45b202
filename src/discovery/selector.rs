//! Entry point for replication lag filtering.
//!
//! Picks the algorithm from the current settings. The legacy algorithm is
//! run a second time when it dropped exactly one tablet and spare tablets
//! remain, which catches a second outlier hidden by the first. This is a
//! bounded second look, not a fixpoint.

use std::fmt;
use std::sync::Arc;
use crate::discovery::legacy::filter_stats_by_lag_with_legacy_algorithm;
use crate::discovery::settings::LagSettings;
use crate::discovery::tablet::TabletHealth;
use crate::discovery::threshold::filter_stats_by_lag;
use crate::observability::metrics;

/// Which filter produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Threshold,
    Legacy,
}

impl Algorithm {
    pub fn current<S: LagSettings + ?Sized>(settings: &S) -> Self {
        if settings.legacy_algorithm() {
            Algorithm::Legacy
        } else {
            Algorithm::Threshold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Threshold => "threshold",
            Algorithm::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the tablets of `tablets` that are eligible to serve.
///
/// Never fails: empty or fully unusable input yields an empty list.
/// Non-serving tablets, tablets with a probe error and tablets without
/// stats never appear in the result.
pub fn filter_stats_by_replication_lag<'a, S: LagSettings + ?Sized>(
    settings: &S,
    tablets: &[&'a TabletHealth],
) -> Vec<&'a TabletHealth> {
    let algorithm = Algorithm::current(settings);
    let mut reran = false;

    let res = match algorithm {
        Algorithm::Threshold => filter_stats_by_lag(settings, tablets),
        Algorithm::Legacy => {
            let first = filter_stats_by_lag_with_legacy_algorithm(settings, tablets);
            if first.len() > settings.min_number_serving_tablets() && first.len() + 1 == tablets.len() {
                reran = true;
                filter_stats_by_lag_with_legacy_algorithm(settings, &first)
            } else {
                first
            }
        }
    };

    if let Some(first) = tablets.first() {
        tracing::debug!(
            keyspace = %first.target.keyspace,
            shard = %first.target.shard,
            tablet_type = %first.target.tablet_type,
            algorithm = %algorithm,
            input = tablets.len(),
            output = res.len(),
            reran,
            "Filtered tablets by replication lag"
        );
    }
    metrics::record_filter_run(algorithm, tablets.len(), res.len(), reran);

    res
}

/// A lag filter bound to a settings provider.
///
/// Cheap to clone; clones share the provider.
#[derive(Debug)]
pub struct ReplicationLagFilter<S: ?Sized> {
    settings: Arc<S>,
}

impl<S: ?Sized> Clone for ReplicationLagFilter<S> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
        }
    }
}

impl<S: LagSettings + ?Sized> ReplicationLagFilter<S> {
    pub fn new(settings: Arc<S>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Arc<S> {
        &self.settings
    }

    /// See [`filter_stats_by_replication_lag`].
    pub fn filter<'a>(&self, tablets: &[&'a TabletHealth]) -> Vec<&'a TabletHealth> {
        filter_stats_by_replication_lag(self.settings.as_ref(), tablets)
    }

    /// Filter an owned list, cloning the eligible tablets.
    pub fn filter_owned(&self, tablets: &[TabletHealth]) -> Vec<TabletHealth> {
        let refs: Vec<&TabletHealth> = tablets.iter().collect();
        self.filter(&refs).into_iter().cloned().collect()
    }
}
