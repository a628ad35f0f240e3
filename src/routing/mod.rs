//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     "METHOD [HOST]/PATH"
//!     → pattern.rs (parse into method, host, path)
//!     → chain.rs (compose global + route middleware around the endpoint)
//!     → table.rs (insert, rejecting duplicates)
//!
//! Incoming Request (host, method, path, headers)
//!     → router.rs (normalize, log, resolve hostless then hosted)
//!     → composed handler, or 404
//! ```
//!
//! # Design Decisions
//! - Routes are registered during startup and read-only afterwards
//! - Exact matching only: no wildcards, no prefixes
//! - Deterministic: hostless entries always win over host-qualified ones
//! - Configuration errors abort startup instead of misrouting at runtime

pub mod chain;
pub mod error;
pub mod pattern;
pub mod router;
pub mod table;

pub use chain::{build_chain, Handler, Middleware};
pub use error::MuxError;
pub use pattern::RoutePattern;
pub use router::{Mux, MuxSettings, RouteOptions};
pub use table::{MuxEntry, RouteMetadata, RouteTable};
