//! Tunable replication lag thresholds.
//!
//! # Responsibilities
//! - Define the four parameters the filter reads on every call
//! - Provide a store whose parameters can be updated independently at runtime
//! - Provide a fixed provider for tests and static setups
//!
//! # Design Decisions
//! - One atomic cell per parameter: reads never tear, no cross-parameter atomicity
//! - Settings are read at call time, so an update applies to the next filtering call

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Default threshold below which lag is acceptable.
pub const DEFAULT_LOW_REPLICATION_LAG: Duration = Duration::from_secs(30);

/// Default threshold above which a tablet is excluded even to meet the floor.
pub const DEFAULT_HIGH_REPLICATION_LAG_MIN_SERVING: Duration = Duration::from_secs(2 * 60 * 60);

/// Default number of tablets kept per tablet type when available.
pub const DEFAULT_MIN_NUMBER_SERVING_TABLETS: usize = 2;

/// Read access to the lag thresholds.
pub trait LagSettings: Send + Sync {
    /// Lag at or below this value is considered healthy.
    fn low_replication_lag(&self) -> Duration;

    /// Lag above this value excludes a tablet even when the floor is not met.
    fn high_replication_lag_min_serving(&self) -> Duration;

    /// Minimum number of tablets to keep serving, if enough are eligible.
    fn min_number_serving_tablets(&self) -> usize;

    /// Whether the outlier-based legacy algorithm is in use.
    fn legacy_algorithm(&self) -> bool;
}

/// A plain set of thresholds.
///
/// Used as the `[discovery]` config section, as the payload of the debug
/// endpoint and as a fixed [`LagSettings`] provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LagThresholds {
    #[serde(rename = "low_replication_lag_secs", with = "duration_secs")]
    pub low_replication_lag: Duration,

    #[serde(rename = "high_replication_lag_minimum_serving_secs", with = "duration_secs")]
    pub high_replication_lag_min_serving: Duration,

    #[serde(rename = "min_number_serving_tablets")]
    pub min_number_serving_tablets: usize,

    #[serde(rename = "legacy_replication_lag_algorithm")]
    pub legacy_algorithm: bool,
}

impl Default for LagThresholds {
    fn default() -> Self {
        Self {
            low_replication_lag: DEFAULT_LOW_REPLICATION_LAG,
            high_replication_lag_min_serving: DEFAULT_HIGH_REPLICATION_LAG_MIN_SERVING,
            min_number_serving_tablets: DEFAULT_MIN_NUMBER_SERVING_TABLETS,
            legacy_algorithm: true,
        }
    }
}

impl LagSettings for LagThresholds {
    fn low_replication_lag(&self) -> Duration {
        self.low_replication_lag
    }

    fn high_replication_lag_min_serving(&self) -> Duration {
        self.high_replication_lag_min_serving
    }

    fn min_number_serving_tablets(&self) -> usize {
        self.min_number_serving_tablets
    }

    fn legacy_algorithm(&self) -> bool {
        self.legacy_algorithm
    }
}

/// Process-wide settings store, updatable while filtering calls read it.
#[derive(Debug)]
pub struct AtomicLagSettings {
    low_lag_nanos: AtomicU64,
    high_lag_nanos: AtomicU64,
    min_tablets: AtomicUsize,
    legacy: AtomicBool,
}

impl AtomicLagSettings {
    pub fn new(initial: LagThresholds) -> Self {
        Self {
            low_lag_nanos: AtomicU64::new(to_nanos(initial.low_replication_lag)),
            high_lag_nanos: AtomicU64::new(to_nanos(initial.high_replication_lag_min_serving)),
            min_tablets: AtomicUsize::new(initial.min_number_serving_tablets),
            legacy: AtomicBool::new(initial.legacy_algorithm),
        }
    }

    pub fn set_low_replication_lag(&self, lag: Duration) {
        self.low_lag_nanos.store(to_nanos(lag), Ordering::Relaxed);
    }

    pub fn set_high_replication_lag_min_serving(&self, lag: Duration) {
        self.high_lag_nanos.store(to_nanos(lag), Ordering::Relaxed);
    }

    pub fn set_min_number_serving_tablets(&self, count: usize) {
        self.min_tablets.store(count, Ordering::Relaxed);
    }

    pub fn set_legacy_algorithm(&self, legacy: bool) {
        self.legacy.store(legacy, Ordering::Relaxed);
    }

    /// Read every parameter. Each value is coherent on its own; the group
    /// may straddle a concurrent update.
    pub fn snapshot(&self) -> LagThresholds {
        LagThresholds {
            low_replication_lag: self.low_replication_lag(),
            high_replication_lag_min_serving: self.high_replication_lag_min_serving(),
            min_number_serving_tablets: self.min_number_serving_tablets(),
            legacy_algorithm: self.legacy_algorithm(),
        }
    }

    /// Store every parameter of `thresholds`, one cell at a time.
    pub fn apply(&self, thresholds: &LagThresholds) {
        self.set_low_replication_lag(thresholds.low_replication_lag);
        self.set_high_replication_lag_min_serving(thresholds.high_replication_lag_min_serving);
        self.set_min_number_serving_tablets(thresholds.min_number_serving_tablets);
        self.set_legacy_algorithm(thresholds.legacy_algorithm);
    }
}

impl Default for AtomicLagSettings {
    fn default() -> Self {
        Self::new(LagThresholds::default())
    }
}

impl LagSettings for AtomicLagSettings {
    fn low_replication_lag(&self) -> Duration {
        Duration::from_nanos(self.low_lag_nanos.load(Ordering::Relaxed))
    }

    fn high_replication_lag_min_serving(&self) -> Duration {
        Duration::from_nanos(self.high_lag_nanos.load(Ordering::Relaxed))
    }

    fn min_number_serving_tablets(&self) -> usize {
        self.min_tablets.load(Ordering::Relaxed)
    }

    fn legacy_algorithm(&self) -> bool {
        self.legacy.load(Ordering::Relaxed)
    }
}

// Saturates at ~584 years.
fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Serialize a `Duration` as whole seconds.
pub(crate) mod duration_secs {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let s = AtomicLagSettings::default();
        assert_eq!(s.low_replication_lag(), Duration::from_secs(30));
        assert_eq!(s.high_replication_lag_min_serving(), Duration::from_secs(7200));
        assert_eq!(s.min_number_serving_tablets(), 2);
        assert!(s.legacy_algorithm());
    }

    #[test]
    fn test_setters_are_independent() {
        let s = AtomicLagSettings::default();
        s.set_low_replication_lag(Duration::from_millis(1500));
        s.set_min_number_serving_tablets(5);

        let snap = s.snapshot();
        assert_eq!(snap.low_replication_lag, Duration::from_millis(1500));
        assert_eq!(snap.high_replication_lag_min_serving, DEFAULT_HIGH_REPLICATION_LAG_MIN_SERVING);
        assert_eq!(snap.min_number_serving_tablets, 5);
        assert!(snap.legacy_algorithm);
    }

    #[test]
    fn test_apply_overwrites_all() {
        let s = AtomicLagSettings::default();
        let t = LagThresholds {
            low_replication_lag: Duration::from_secs(10),
            high_replication_lag_min_serving: Duration::from_secs(600),
            min_number_serving_tablets: 1,
            legacy_algorithm: false,
        };
        s.apply(&t);
        assert_eq!(s.snapshot(), t);
    }

    #[test]
    fn test_concurrent_reads_never_tear() {
        let s = Arc::new(AtomicLagSettings::default());
        let a = Duration::from_secs(1);
        let b = Duration::from_secs(u32::MAX as u64 * 4);

        let writer = {
            let s = s.clone();
            std::thread::spawn(move || {
                for i in 0..10_000 {
                    s.set_high_replication_lag_min_serving(if i % 2 == 0 { a } else { b });
                }
            })
        };
        for _ in 0..10_000 {
            let v = s.high_replication_lag_min_serving();
            assert!(v == a || v == b || v == DEFAULT_HIGH_REPLICATION_LAG_MIN_SERVING);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_thresholds_toml_shape() {
        let t: LagThresholds = toml::from_str(
            "low_replication_lag_secs = 45\nlegacy_replication_lag_algorithm = false\n",
        )
        .unwrap();
        assert_eq!(t.low_replication_lag, Duration::from_secs(45));
        assert_eq!(t.high_replication_lag_min_serving, DEFAULT_HIGH_REPLICATION_LAG_MIN_SERVING);
        assert!(!t.legacy_algorithm);
    }
}
