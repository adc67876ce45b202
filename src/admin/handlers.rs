use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::config::validate_thresholds;
use crate::discovery::{Algorithm, LagThresholds, TabletHealth};
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub algorithm: &'static str,
}

/// Partial update of the lag settings. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EnvUpdate {
    pub low_replication_lag_secs: Option<u64>,
    pub high_replication_lag_minimum_serving_secs: Option<u64>,
    pub min_number_serving_tablets: Option<usize>,
    pub legacy_replication_lag_algorithm: Option<bool>,
}

impl EnvUpdate {
    fn merged(&self, current: LagThresholds) -> LagThresholds {
        LagThresholds {
            low_replication_lag: self
                .low_replication_lag_secs
                .map_or(current.low_replication_lag, Duration::from_secs),
            high_replication_lag_min_serving: self
                .high_replication_lag_minimum_serving_secs
                .map_or(current.high_replication_lag_min_serving, Duration::from_secs),
            min_number_serving_tablets: self
                .min_number_serving_tablets
                .unwrap_or(current.min_number_serving_tablets),
            legacy_algorithm: self
                .legacy_replication_lag_algorithm
                .unwrap_or(current.legacy_algorithm),
        }
    }
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        algorithm: Algorithm::current(state.settings()).as_str(),
    })
}

pub async fn get_env(State(state): State<AppState>) -> Json<LagThresholds> {
    Json(state.settings().snapshot())
}

pub async fn set_env(
    State(state): State<AppState>,
    Json(update): Json<EnvUpdate>,
) -> Response {
    let settings = state.settings();
    let merged = update.merged(settings.snapshot());
    if let Err(e) = validate_thresholds(&merged) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    // Only touch the parameters the caller named.
    if update.low_replication_lag_secs.is_some() {
        settings.set_low_replication_lag(merged.low_replication_lag);
    }
    if update.high_replication_lag_minimum_serving_secs.is_some() {
        settings.set_high_replication_lag_min_serving(merged.high_replication_lag_min_serving);
    }
    if let Some(count) = update.min_number_serving_tablets {
        settings.set_min_number_serving_tablets(count);
    }
    if let Some(legacy) = update.legacy_replication_lag_algorithm {
        settings.set_legacy_algorithm(legacy);
    }

    let current = settings.snapshot();
    metrics::record_settings(&current);
    tracing::info!(update = ?update, "Replication lag settings changed via debug endpoint");
    Json(current).into_response()
}

pub async fn filter_tablets(
    State(state): State<AppState>,
    Json(tablets): Json<Vec<TabletHealth>>,
) -> Json<Vec<TabletHealth>> {
    Json(state.filter.filter_owned(&tablets))
}
