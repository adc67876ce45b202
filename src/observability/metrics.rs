//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tablet_filter_runs_total` (counter): filtering calls by algorithm
//! - `tablet_filter_excluded_total` (counter): tablets excluded by algorithm
//! - `tablet_filter_legacy_reruns_total` (counter): legacy second passes
//! - `tablet_filter_low_replication_lag_seconds` (gauge)
//! - `tablet_filter_high_replication_lag_seconds` (gauge)
//! - `tablet_filter_min_serving_tablets` (gauge)
//! - `tablet_filter_legacy_algorithm` (gauge): 1=legacy, 0=threshold

use std::net::SocketAddr;
use metrics_exporter_prometheus::PrometheusBuilder;
use crate::discovery::{Algorithm, LagThresholds};

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_filter_run(algorithm: Algorithm, input: usize, output: usize, reran: bool) {
    let label = algorithm.as_str();
    metrics::counter!("tablet_filter_runs_total", "algorithm" => label).increment(1);
    metrics::counter!("tablet_filter_excluded_total", "algorithm" => label)
        .increment(input.saturating_sub(output) as u64);
    if reran {
        metrics::counter!("tablet_filter_legacy_reruns_total").increment(1);
    }
}

pub fn record_settings(thresholds: &LagThresholds) {
    metrics::gauge!("tablet_filter_low_replication_lag_seconds")
        .set(thresholds.low_replication_lag.as_secs_f64());
    metrics::gauge!("tablet_filter_high_replication_lag_seconds")
        .set(thresholds.high_replication_lag_min_serving.as_secs_f64());
    metrics::gauge!("tablet_filter_min_serving_tablets")
        .set(thresholds.min_number_serving_tablets as f64);
    metrics::gauge!("tablet_filter_legacy_algorithm")
        .set(if thresholds.legacy_algorithm { 1.0 } else { 0.0 });
}
