//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → [discovery] section applied to AtomicLagSettings
//!     → atomic swap of Arc<GatewayConfig>
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - An invalid reload is logged and the running config kept
//! - Lag thresholds may also be changed through the debug endpoint; the
//!   next file reload overwrites those changes

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{AdminConfig, GatewayConfig, ObservabilityConfig};
pub use validation::{validate_config, validate_thresholds, ValidationError};
