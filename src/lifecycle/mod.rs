//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build mux → Register routes → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: every route is registered before the listener accepts
//! - Any registration error is fatal; the process never serves a partial table

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
