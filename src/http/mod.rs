//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP listener
//!     → server.rs (axum, trace layer)
//!     → admin router (bearer auth)
//!         - /admin/status
//!         - /debug/env (get / set lag thresholds)
//!         - /discovery/filter
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
