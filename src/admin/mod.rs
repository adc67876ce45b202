//! Admin and debug endpoints.
//!
//! Exposes the replication lag settings for inspection and live tuning,
//! and the filter itself for ad-hoc checks.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::{get, post}, Router};
use crate::http::server::AppState;
use self::auth::admin_auth_middleware;
use self::handlers::*;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/debug/env", get(get_env).post(set_env))
        .route("/discovery/filter", post(filter_tablets))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
