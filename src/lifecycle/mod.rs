//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → admin server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     Ctrl+C / SIGTERM → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
