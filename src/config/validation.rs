//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and log level
//! - Require the low lag threshold to sit below the high one
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - The filters themselves never enforce threshold ordering; it is checked
//!   here, where operators supply values

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use crate::config::schema::GatewayConfig;
use crate::discovery::LagThresholds;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("low replication lag ({low:?}) must be below high replication lag ({high:?})")]
    LagThresholdOrder { low: Duration, high: Duration },

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("admin.api_key must not be empty when set")]
    EmptyApiKey,
}

/// Validate a full configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("admin.bind_address", &config.admin.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.admin.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        errors.push(ValidationError::EmptyApiKey);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if let Err(e) = validate_thresholds(&config.discovery) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `low_replication_lag < high_replication_lag_min_serving`.
pub fn validate_thresholds(thresholds: &LagThresholds) -> Result<(), ValidationError> {
    if thresholds.low_replication_lag >= thresholds.high_replication_lag_min_serving {
        return Err(ValidationError::LagThresholdOrder {
            low: thresholds.low_replication_lag,
            high: thresholds.high_replication_lag_min_serving,
        });
    }
    Ok(())
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
