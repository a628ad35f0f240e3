//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch counters, route gauge)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap facade calls; no recorder means no cost beyond the call

pub mod logging;
pub mod metrics;
