//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, trace + timeout layers)
//!     → routing::Mux (request.rs normalizes host and headers)
//!     → middleware/ (request id, server name, caller supplied)
//!     → handlers.rs or caller endpoints
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::{RequestId, X_REQUEST_ID};
pub use server::HttpServer;
