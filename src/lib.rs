//! HTTP request multiplexer for small services.
//!
//! Routes are registered as `METHOD [HOST]/PATH` patterns during startup,
//! each with its middleware chain composed once, then served read-only.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::MuxConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Handler, Middleware, Mux, MuxError, RouteOptions};
